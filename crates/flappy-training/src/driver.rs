use std::ops::ControlFlow;

use flappy_engine::{ConfigError, Episode, FieldSeed, GameConfig, Snapshot};

use crate::{optimizer::Optimizer, report::GenerationReport};

/// Why [`GenerationalDriver::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum StopReason {
    #[display("generation limit reached")]
    MaxGenerations,
    #[display("optimizer satisfied")]
    Satisfied,
    #[display("stopped")]
    Stopped,
}

/// Result of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingOutcome {
    pub reason: StopReason,
    /// One report per completed generation.
    pub reports: Vec<GenerationReport>,
}

/// Repeats episodes across generations.
///
/// Each generation binds one agent per genome of the optimizer, runs the
/// episode to completion and then calls [`Optimizer::reproduce`]. The
/// generation counter only advances for completed episodes: a stopped episode
/// is discarded without reproduction.
///
/// Use [`run`](Self::run) to train as fast as possible, or call
/// [`tick`](Self::tick) repeatedly to drive training one tick at a time (for
/// example from a rendering loop).
#[derive(Debug)]
pub struct GenerationalDriver<O> {
    episode: Episode,
    optimizer: O,
    generation: usize,
    max_generations: usize,
}

impl<O> GenerationalDriver<O>
where
    O: Optimizer,
{
    /// Fails if `config` does not pass [`GameConfig::validate`].
    pub fn new(
        config: GameConfig,
        optimizer: O,
        max_generations: usize,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            episode: Episode::new(config)?,
            optimizer,
            generation: 0,
            max_generations,
        })
    }

    /// Uses a deterministic obstacle sequence for the whole run.
    #[must_use]
    pub fn with_seed(mut self, seed: FieldSeed) -> Self {
        self.episode.reseed(seed);
        self
    }

    /// Number of completed generations.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    #[must_use]
    pub fn max_generations(&self) -> usize {
        self.max_generations
    }

    #[must_use]
    pub fn episode(&self) -> &Episode {
        &self.episode
    }

    #[must_use]
    pub fn optimizer(&self) -> &O {
        &self.optimizer
    }

    #[must_use]
    pub fn into_optimizer(self) -> O {
        self.optimizer
    }

    /// Reason training is over, or `None` if another generation should run.
    #[must_use]
    pub fn finished(&self) -> Option<StopReason> {
        if self.optimizer.is_satisfied() {
            Some(StopReason::Satisfied)
        } else if self.generation >= self.max_generations {
            Some(StopReason::MaxGenerations)
        } else {
            None
        }
    }

    /// Runs generations until the limit, the optimizer is satisfied or `observer` breaks.
    ///
    /// `observer` sees a snapshot after every tick.
    pub fn run<F>(&mut self, mut observer: F) -> TrainingOutcome
    where
        F: FnMut(&Snapshot<'_>) -> ControlFlow<()>,
    {
        let mut reports = vec![];
        loop {
            if let Some(reason) = self.finished() {
                log::info!(
                    "training finished after {} generations: {reason}",
                    self.generation
                );
                return TrainingOutcome { reason, reports };
            }
            match self.run_generation(&mut observer) {
                Some(report) => reports.push(report),
                None => {
                    return TrainingOutcome {
                        reason: StopReason::Stopped,
                        reports,
                    };
                }
            }
        }
    }

    /// Runs one whole generation.
    ///
    /// Returns `None` if `observer` stopped the episode.
    pub fn run_generation<F>(&mut self, observer: F) -> Option<GenerationReport>
    where
        F: FnMut(&Snapshot<'_>) -> ControlFlow<()>,
    {
        self.begin();
        let summary = self.episode.run(self.optimizer.genomes_mut(), observer);
        if summary.termination.is_stopped() {
            log::info!(
                "generation #{} stopped after {} ticks",
                self.generation,
                summary.ticks
            );
            return None;
        }
        Some(self.complete())
    }

    /// Advances training by one tick.
    ///
    /// Starts a new generation if none is running, and completes it once the
    /// episode is done. Returns the report of a generation completed by this
    /// tick. Does nothing once [`finished`](Self::finished) returns `Some`.
    pub fn tick(&mut self, human_requests: &[bool]) -> Option<GenerationReport> {
        if !self.episode.state().is_running() {
            if self.finished().is_some() {
                return None;
            }
            self.begin();
        }
        let state = self
            .episode
            .tick(self.optimizer.genomes_mut(), human_requests);
        state.is_done().then(|| self.complete())
    }

    /// Stops the running episode. Its generation does not count.
    pub fn stop(&mut self) {
        self.episode.stop();
    }

    fn begin(&mut self) {
        log::debug!("generation #{} started", self.generation);
        self.episode
            .reset_for_genomes(self.optimizer.genomes_mut(), self.generation);
    }

    fn complete(&mut self) -> GenerationReport {
        let summary = self.episode.summary();
        let report = GenerationReport::new(self.generation, &summary, self.optimizer.genomes());
        log::info!("{report}");
        self.optimizer.reproduce();
        self.generation += 1;
        report
    }
}
