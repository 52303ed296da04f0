use std::{ops::ControlFlow, path::PathBuf};

use anyhow::Context as _;
use chrono::Utc;
use flappy_engine::{FieldSeed, Genome as _};
use flappy_training::{EvolverSchedule, GenerationalDriver, Population, StopReason};

use crate::{schema::ai_model::AiModel, util};

mod watch;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrainAiArg {
    /// Game config file (JSON format)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum number of generations
    #[arg(long, default_value_t = 100)]
    generations: usize,
    /// Number of individuals per generation
    #[arg(long, default_value_t = 50)]
    population: usize,
    /// Obstacle seed (32 hex characters). Random if omitted
    #[arg(long)]
    seed: Option<FieldSeed>,
    /// Stop once an individual reaches this fitness
    #[arg(long)]
    target_fitness: Option<f32>,
    /// Name stored in the model file
    #[arg(long, default_value = "flappy")]
    name: String,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
    /// Render training in the terminal
    #[arg(long, default_value_t = false)]
    watch: bool,
}

impl TrainAiArg {
    pub(crate) fn watch(&self) -> bool {
        self.watch
    }
}

pub(crate) fn run(arg: &TrainAiArg) -> anyhow::Result<()> {
    let TrainAiArg {
        config,
        generations,
        population,
        seed,
        target_fitness,
        name,
        output,
        watch,
    } = arg;

    let config = util::load_game_config(config.as_deref())?;
    anyhow::ensure!(*population > 0, "Population must contain at least one individual");

    let seed = seed.unwrap_or_else(rand::random);
    log::info!("obstacle seed: {seed}");

    let population = Population::random(*population, EvolverSchedule::Phased, &mut rand::rng())
        .with_fitness_target(*target_fitness);
    let mut driver = GenerationalDriver::new(config, population, *generations)?.with_seed(seed);

    let reason = if *watch {
        watch::run(&mut driver)?
    } else {
        driver.run(|_| ControlFlow::Continue(())).reason
    };

    let completed = driver.generation();
    let population = driver.into_optimizer();
    eprintln!("Training finished after {completed} generations ({reason}).");
    if reason == StopReason::Stopped && completed == 0 {
        eprintln!("No generation was completed, nothing to save.");
        return Ok(());
    }

    let best = population
        .best()
        .context("Population has no evaluated individual")?;
    eprintln!("Best individual: {} => {:.3}", best.id(), best.fitness());
    let model = AiModel {
        name: name.clone(),
        trained_at: Utc::now(),
        generation: completed,
        final_fitness: best.fitness(),
        controller: best.controller().clone(),
    };
    util::Output::save_json(&model, output.clone())?;

    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = &output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Name: {}", model.name);
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Seed: {seed}");
    eprintln!("  Final fitness: {:.3}", model.final_fitness);
    eprintln!("  Weights: {}", model.controller.weights().len());

    Ok(())
}
