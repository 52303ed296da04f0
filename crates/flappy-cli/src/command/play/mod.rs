use std::path::PathBuf;

use crate::{
    command::play::app::PlayApp,
    tui::Tui,
    util::{self, load_game_config},
};

mod app;
mod screens;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ManualPlayArg {
    /// Game config file (JSON format)
    #[clap(long)]
    config: Option<PathBuf>,
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct VersusArg {
    /// Path to the opponent's model file (JSON format)
    model_path: PathBuf,
    /// Game config file (JSON format)
    #[clap(long)]
    config: Option<PathBuf>,
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Path to the model file (JSON format)
    model_path: PathBuf,
    /// Game config file (JSON format)
    #[clap(long)]
    config: Option<PathBuf>,
    /// Run in turbo mode
    #[clap(long, default_value_t = false)]
    turbo: bool,
}

pub(crate) fn run_manual(arg: &ManualPlayArg) -> anyhow::Result<()> {
    let ManualPlayArg { config } = arg;
    let config = load_game_config(config.as_deref())?;

    let mut app = PlayApp::manual(config, None)?;
    Tui::new().run(&mut app)
}

pub(crate) fn run_versus(arg: &VersusArg) -> anyhow::Result<()> {
    let VersusArg { model_path, config } = arg;
    let config = load_game_config(config.as_deref())?;
    let model = util::read_ai_model_file(model_path)?;

    let mut app = PlayApp::manual(config, Some(&model))?;
    Tui::new().run(&mut app)
}

pub(crate) fn run_auto(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        model_path,
        config,
        turbo,
    } = arg;
    let config = load_game_config(config.as_deref())?;
    let model = util::read_ai_model_file(model_path)?;

    let mut app = PlayApp::auto(config, &model, *turbo)?;
    Tui::new().run(&mut app)
}
