use clap::{Parser, Subcommand};
use env_logger::Env;

use self::{
    play::{AutoPlayArg, ManualPlayArg, VersusArg},
    train_ai::TrainAiArg,
};

mod play;
mod train_ai;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play the game with the keyboard
    #[command(name = "play")]
    ManualPlay(#[clap(flatten)] ManualPlayArg),
    /// Play against a trained model
    Versus(#[clap(flatten)] VersusArg),
    /// Watch a trained model play
    #[command(name = "auto-play")]
    AutoPlay(#[clap(flatten)] AutoPlayArg),
    /// Train neural controllers using a genetic algorithm
    TrainAi(#[clap(flatten)] TrainAiArg),
}

impl Mode {
    /// Terminal modes keep the log quiet so it does not tear the alternate screen.
    fn default_log_filter(&self) -> &'static str {
        match self {
            Mode::TrainAi(arg) if !arg.watch() => "info",
            _ => "warn",
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mode = args
        .mode
        .unwrap_or(Mode::ManualPlay(ManualPlayArg::default()));
    env_logger::Builder::from_env(Env::default().default_filter_or(mode.default_log_filter()))
        .init();

    match mode {
        Mode::ManualPlay(arg) => play::run_manual(&arg)?,
        Mode::Versus(arg) => play::run_versus(&arg)?,
        Mode::AutoPlay(arg) => play::run_auto(&arg)?,
        Mode::TrainAi(arg) => train_ai::run(&arg)?,
    }
    Ok(())
}
