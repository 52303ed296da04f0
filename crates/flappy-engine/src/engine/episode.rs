use std::ops::ControlFlow;

use crate::{
    ConfigError, GameConfig,
    core::{Agent, Genome, InputSource, SensorInputs},
};

use super::{
    collision::CollisionIndex, field_seed::FieldSeed, fitness::FitnessAccountant,
    obstacle_field::ObstacleField, snapshot::Snapshot,
};

/// Lifecycle of an [`Episode`].
///
/// ```text
/// Init ──reset()──> Running ──(all dead | cutoff | stop)──> Done ──reset()──> Running
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum EpisodeState {
    Init,
    Running,
    Done,
}

/// Why an episode reached [`EpisodeState::Done`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum Termination {
    #[display("all agents dead")]
    AllDead,
    #[display("score cutoff reached")]
    ScoreCutoff,
    #[display("stopped")]
    Stopped,
}

/// Outcome of a finished episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeSummary {
    pub ticks: u64,
    pub termination: Termination,
    /// Final score of each agent, in binding order.
    pub scores: Vec<u32>,
}

impl EpisodeSummary {
    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.scores.iter().copied().max().unwrap_or(0)
    }
}

/// One run of the simulation from reset until every agent is dead.
///
/// The episode owns the obstacle field and the agents. Genomes stay with their
/// optimizer: every call that needs them borrows the genome slice, and agents
/// refer to their genome by index.
///
/// # Tick
///
/// Each [`tick`](Self::tick) performs, in order:
///
/// 1. advance obstacles, maybe spawn one, reap passed pairs that left the screen
/// 2. credit a clear if the lead agent passed the nearest pair
/// 3. for every live agent in binding order: survival reward, command
///    (controller or human request), physics step, collision test
/// 4. check termination
///
/// All mutations of a tick finish before `tick` returns, so stopping between
/// two ticks always leaves a consistent state.
///
/// # Example
///
/// ```
/// use flappy_engine::{
///     Controller, Episode, FieldSeed, GameConfig, Genome, GenomeId, SensorInputs,
/// };
///
/// struct Glider(f32);
///
/// impl Controller for Glider {
///     fn evaluate(&self, _inputs: &SensorInputs) -> f32 {
///         0.0
///     }
/// }
///
/// impl Genome for Glider {
///     fn id(&self) -> GenomeId {
///         GenomeId(0)
///     }
///     fn fitness(&self) -> f32 {
///         self.0
///     }
///     fn fitness_mut(&mut self) -> &mut f32 {
///         &mut self.0
///     }
/// }
///
/// let mut genomes = [Glider(0.0)];
/// let mut episode = Episode::with_seed(GameConfig::default(), FieldSeed::from_u64(1))?;
/// episode.reset_for_genomes(&mut genomes, 0);
/// let summary = episode.run(&mut genomes, |_| std::ops::ControlFlow::Continue(()));
///
/// assert!(summary.termination.is_all_dead());
/// assert!(genomes[0].fitness() > 0.0);
/// # Ok::<(), flappy_engine::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Episode {
    config: GameConfig,
    accountant: FitnessAccountant,
    collisions: CollisionIndex,
    field: ObstacleField,
    agents: Vec<Agent>,
    ticks: u64,
    generation: usize,
    state: EpisodeState,
    termination: Option<Termination>,
}

impl Episode {
    /// Creates an episode in [`EpisodeState::Init`] with a random obstacle seed.
    ///
    /// Fails if `config` does not pass [`GameConfig::validate`].
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_field(config, ObstacleField::new(config)?))
    }

    /// Like [`Self::new`], but with deterministic obstacles.
    pub fn with_seed(config: GameConfig, seed: FieldSeed) -> Result<Self, ConfigError> {
        Ok(Self::from_field(config, ObstacleField::with_seed(config, seed)?))
    }

    /// Restarts the obstacle sequence from `seed`. Takes effect on the next spawn.
    pub fn reseed(&mut self, seed: FieldSeed) {
        self.field.reseed(seed);
    }

    fn from_field(config: GameConfig, field: ObstacleField) -> Self {
        Self {
            accountant: FitnessAccountant::new(&config),
            collisions: CollisionIndex::new(&config),
            config,
            field,
            agents: vec![],
            ticks: 0,
            generation: 0,
            state: EpisodeState::Init,
            termination: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> EpisodeState {
        self.state
    }

    #[must_use]
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    #[must_use]
    pub fn field(&self) -> &ObstacleField {
        &self.field
    }

    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    #[must_use]
    pub fn accountant(&self) -> &FitnessAccountant {
        &self.accountant
    }

    pub fn live_agents(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.agents.iter().filter(|agent| agent.is_alive())
    }

    /// Read-only view for renderers.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(self)
    }

    /// Starts a new run with one agent per input source.
    ///
    /// Clears the field, spawns the first obstacle-pair, creates the agents at
    /// the spawn point and zeroes the fitness of every genome in `genomes`.
    pub fn reset<G, I>(&mut self, inputs: I, genomes: &mut [G], generation: usize)
    where
        G: Genome,
        I: IntoIterator<Item = InputSource>,
    {
        self.field.clear();
        self.field.spawn();
        self.agents = inputs
            .into_iter()
            .map(|input| Agent::new(&self.config, input))
            .collect();
        for genome in genomes.iter_mut() {
            *genome.fitness_mut() = 0.0;
        }
        self.ticks = 0;
        self.generation = generation;
        self.termination = None;
        self.state = EpisodeState::Running;
        log::debug!(
            "episode reset: generation {generation}, {} agents",
            self.agents.len()
        );
    }

    /// [`reset`](Self::reset) binding one controller-driven agent to each genome.
    pub fn reset_for_genomes<G>(&mut self, genomes: &mut [G], generation: usize)
    where
        G: Genome,
    {
        let inputs = (0..genomes.len()).map(InputSource::controller);
        self.reset(inputs, genomes, generation);
    }

    /// Advances the simulation by one tick.
    ///
    /// `human_requests[i]` is the impulse request of the `i`-th human agent
    /// (binding order); missing entries count as "not requested". Each `true`
    /// entry fires one impulse. Does nothing unless the episode is running.
    pub fn tick<G>(&mut self, genomes: &mut [G], human_requests: &[bool]) -> EpisodeState
    where
        G: Genome,
    {
        if !self.state.is_running() {
            return self.state;
        }

        let Self {
            config,
            accountant,
            collisions,
            field,
            agents,
            ..
        } = self;

        field.advance();
        field.maybe_spawn();
        field.reap();

        accountant.settle_clear(field, agents, genomes);

        let mut human_index = 0;
        for agent in agents.iter_mut() {
            let human_request = if agent.input().is_human() {
                human_index += 1;
                human_requests
                    .get(human_index - 1)
                    .copied()
                    .unwrap_or(false)
            } else {
                false
            };
            if !agent.is_alive() {
                continue;
            }

            accountant.reward_survival(agent, genomes);

            let impulse = match *agent.input() {
                InputSource::Human => human_request,
                InputSource::Controller { genome } => {
                    match (field.nearest(), genomes.get(genome)) {
                        (Some(pair), Some(genome)) => {
                            let inputs = SensorInputs::observe(agent.x(), agent.y(), pair, config);
                            genome.wants_impulse(&inputs)
                        }
                        _ => false,
                    }
                }
            };
            agent.step(impulse, config);

            if let Some(kind) = collisions.test(agent, field) {
                accountant.penalize_collision(agent, genomes);
                agent.kill(kind);
                log::trace!("agent hit {kind} at y={:.1}", agent.y());
            }
        }

        self.ticks += 1;
        self.check_termination();
        self.state
    }

    /// Ends a running episode between two ticks.
    pub fn stop(&mut self) {
        if self.state.is_running() {
            self.finish(Termination::Stopped);
        }
    }

    /// Ticks until the episode is done, consulting `observer` after every tick.
    ///
    /// Returning [`ControlFlow::Break`] from the observer stops the episode.
    pub fn run<G, F>(&mut self, genomes: &mut [G], mut observer: F) -> EpisodeSummary
    where
        G: Genome,
        F: FnMut(&Snapshot<'_>) -> ControlFlow<()>,
    {
        while self.state.is_running() {
            self.tick(genomes, &[]);
            if observer(&self.snapshot()).is_break() {
                self.stop();
            }
        }
        self.summary()
    }

    /// Summary of the current run.
    #[must_use]
    pub fn summary(&self) -> EpisodeSummary {
        EpisodeSummary {
            ticks: self.ticks,
            termination: self.termination.unwrap_or(Termination::Stopped),
            scores: self.agents.iter().map(Agent::score).collect(),
        }
    }

    fn check_termination(&mut self) {
        if self.live_agents().next().is_none() {
            self.finish(Termination::AllDead);
            return;
        }
        let cutoff = self.config.score_cutoff;
        let all_past_cutoff = self.live_agents().all(|agent| agent.score() > cutoff);
        if all_past_cutoff {
            self.finish(Termination::ScoreCutoff);
        }
    }

    fn finish(&mut self, termination: Termination) {
        log::debug!(
            "episode finished after {} ticks: {termination}",
            self.ticks
        );
        self.state = EpisodeState::Done;
        self.termination = Some(termination);
    }
}
