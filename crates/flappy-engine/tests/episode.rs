use std::ops::ControlFlow;

use flappy_engine::{
    CollisionKind, ConfigError, Controller, Episode, EpisodeState, FieldSeed, GameConfig, Genome,
    GenomeId, InputSource, SensorInputs, Termination,
};
use proptest::prelude::*;

/// Genome with a fixed decision rule.
#[derive(Debug, Clone)]
enum Rule {
    /// Never issues an impulse.
    Fall,
    /// Always outputs 0.6, just above the threshold.
    Flap,
    /// Impulse whenever the agent is below `y = 300`.
    Hover,
}

#[derive(Debug, Clone)]
struct Stub {
    id: u64,
    rule: Rule,
    fitness: f32,
}

impl Stub {
    fn new(id: u64, rule: Rule) -> Self {
        Self {
            id,
            rule,
            fitness: 0.0,
        }
    }
}

impl Controller for Stub {
    fn evaluate(&self, inputs: &SensorInputs) -> f32 {
        match self.rule {
            Rule::Fall => 0.0,
            Rule::Flap => 0.6,
            Rule::Hover => {
                if inputs.0[0] > 1.5 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

impl Genome for Stub {
    fn id(&self) -> GenomeId {
        GenomeId(self.id)
    }

    fn fitness(&self) -> f32 {
        self.fitness
    }

    fn fitness_mut(&mut self) -> &mut f32 {
        &mut self.fitness
    }
}

/// Gap wide enough that a hovering agent never touches an obstacle.
fn wide_gap_config() -> GameConfig {
    GameConfig {
        land_thickness: 0.0,
        min_pipe_clearance: 20.0,
        pipe_gap: 360.0,
        ..GameConfig::default()
    }
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-2,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_new_episode_waits_for_reset() {
    let mut episode = Episode::with_seed(GameConfig::default(), FieldSeed::from_u64(0)).unwrap();
    let mut genomes = [Stub::new(0, Rule::Fall)];
    assert_eq!(episode.state(), EpisodeState::Init);
    assert_eq!(episode.tick(&mut genomes, &[]), EpisodeState::Init);
    assert_eq!(episode.ticks(), 0);
}

#[test]
fn test_reset_spawns_one_pair_and_zeroes_fitness() {
    let config = GameConfig::default();
    let mut episode = Episode::with_seed(config, FieldSeed::from_u64(0)).unwrap();
    let mut genomes = [Stub::new(0, Rule::Fall), Stub::new(1, Rule::Hover)];
    genomes[0].fitness = 12.0;
    genomes[1].fitness = -3.0;

    episode.reset_for_genomes(&mut genomes, 4);

    assert_eq!(episode.state(), EpisodeState::Running);
    assert_eq!(episode.generation(), 4);
    assert_eq!(episode.field().live().len(), 1);
    assert_eq!(episode.field().live()[0].left(), config.screen_width);
    assert!(genomes.iter().all(|genome| genome.fitness() == 0.0));
    assert_eq!(episode.agents().len(), 2);
    assert!(episode.agents().iter().all(|agent| agent.y() == 300.0));
}

#[test]
fn test_falling_genome_earns_survival_minus_penalty() {
    let config = GameConfig::default();
    let mut episode = Episode::with_seed(config, FieldSeed::from_u64(3)).unwrap();
    let mut genomes = [Stub::new(0, Rule::Fall)];
    episode.reset_for_genomes(&mut genomes, 0);
    let summary = episode.run(&mut genomes, |_| ControlFlow::Continue(()));

    assert_eq!(summary.termination, Termination::AllDead);
    assert_eq!(summary.scores, vec![0]);
    #[expect(clippy::cast_precision_loss)]
    let survival = config.survival_increment() * summary.ticks as f32;
    assert_close(genomes[0].fitness(), survival + config.rewards.collision);
}

#[test]
fn test_fitness_sums_survival_and_clears() {
    let config = GameConfig {
        score_cutoff: 2,
        ..wide_gap_config()
    };
    let mut episode = Episode::with_seed(config, FieldSeed::from_u64(5)).unwrap();
    let mut genomes = [Stub::new(0, Rule::Hover)];
    episode.reset_for_genomes(&mut genomes, 0);
    let summary = episode.run(&mut genomes, |_| ControlFlow::Continue(()));

    assert_eq!(summary.termination, Termination::ScoreCutoff);
    assert_eq!(summary.scores, vec![3]);
    #[expect(clippy::cast_precision_loss)]
    let survival = config.survival_increment() * summary.ticks as f32;
    assert_close(genomes[0].fitness(), survival + 3.0 * config.rewards.clear);
}

#[test]
fn test_score_cutoff_ignores_dead_agents() {
    let config = GameConfig {
        score_cutoff: 0,
        ..wide_gap_config()
    };
    let mut episode = Episode::with_seed(config, FieldSeed::from_u64(9)).unwrap();
    let mut genomes = [Stub::new(0, Rule::Flap), Stub::new(1, Rule::Hover)];
    episode.reset_for_genomes(&mut genomes, 0);
    let summary = episode.run(&mut genomes, |_| ControlFlow::Continue(()));

    assert_eq!(summary.termination, Termination::ScoreCutoff);
    assert!(!episode.agents()[0].is_alive());
    assert_eq!(summary.scores[1], 1);
}

/// With zero-thickness land there is no ceiling band, so an agent that
/// flaps every tick is held at the top edge by the clamp (`impulse > 0`,
/// `gravity >= 0`) and only the first top obstacle can kill it.
#[test]
fn test_always_flapping_agent_stays_on_screen_and_dies() {
    let config = GameConfig {
        land_thickness: 0.0,
        ..GameConfig::default()
    };
    let mut episode = Episode::with_seed(config, FieldSeed::from_u64(1)).unwrap();
    let mut genomes = [Stub::new(0, Rule::Flap)];
    episode.reset_for_genomes(&mut genomes, 0);

    let half_height = config.agent_height / 2.0;
    let summary = episode.run(&mut genomes, |snapshot| {
        let agent = &snapshot.agents()[0];
        assert!(agent.y() >= half_height);
        assert!(agent.y() <= config.screen_height - half_height);
        ControlFlow::Continue(())
    });

    assert_eq!(episode.agents()[0].rect().top, 0.0);
    assert_eq!(
        episode.agents()[0].death_cause(),
        Some(CollisionKind::Obstacle)
    );
    assert_eq!(summary.termination, Termination::AllDead);
    assert_eq!(summary.scores, vec![0]);
}

#[test]
fn test_every_human_request_fires_one_impulse() {
    let config = GameConfig::default();
    let mut episode = Episode::with_seed(config, FieldSeed::from_u64(0)).unwrap();
    let mut genomes: [Stub; 0] = [];
    episode.reset([InputSource::human()], &mut genomes, 0);

    episode.tick(&mut genomes, &[true]);
    assert_eq!(episode.agents()[0].y(), 300.0 - config.impulse);
    assert_eq!(episode.agents()[0].ticks_since_impulse(), 0);

    episode.tick(&mut genomes, &[true]);
    assert_eq!(episode.agents()[0].y(), 300.0 - 2.0 * config.impulse);
    assert_eq!(episode.agents()[0].ticks_since_impulse(), 0, "consecutive presses");

    episode.tick(&mut genomes, &[false]);
    assert_eq!(episode.agents()[0].ticks_since_impulse(), 1);
    episode.tick(&mut genomes, &[true]);
    assert_eq!(episode.agents()[0].ticks_since_impulse(), 0);
}

#[test]
fn test_mixed_human_and_controller_agents() {
    let config = wide_gap_config();
    let mut episode = Episode::with_seed(config, FieldSeed::from_u64(0)).unwrap();
    let mut genomes = [Stub::new(0, Rule::Hover)];
    episode.reset(
        [InputSource::human(), InputSource::controller(0)],
        &mut genomes,
        0,
    );
    for _ in 0..10 {
        episode.tick(&mut genomes, &[false]);
    }
    assert_close(genomes[0].fitness(), config.survival_increment() * 10.0);
    assert_eq!(episode.agents()[0].input(), &InputSource::Human);
}

#[test]
fn test_rejects_invalid_config() {
    let config = GameConfig {
        pipe_gap: 1000.0,
        ..GameConfig::default()
    };
    assert!(matches!(
        Episode::with_seed(config, FieldSeed::from_u64(0)),
        Err(ConfigError::GapDoesNotFit { .. })
    ));
    assert!(Episode::new(config).is_err());
}

#[test]
fn test_reseed_replays_obstacles() {
    let gaps = |episode: &Episode| {
        episode
            .field()
            .pairs()
            .map(|pair| pair.gap_center())
            .collect::<Vec<_>>()
    };
    let mut episode = Episode::with_seed(wide_gap_config(), FieldSeed::from_u64(11)).unwrap();
    let mut genomes = [Stub::new(0, Rule::Hover)];
    episode.reset_for_genomes(&mut genomes, 0);
    let first = gaps(&episode);

    episode.reseed(FieldSeed::from_u64(11));
    episode.reset_for_genomes(&mut genomes, 1);
    assert_eq!(gaps(&episode), first);
}

#[test]
fn test_widest_spacing_keeps_controllers_in_sight_of_a_pair() {
    let base = wide_gap_config();
    let config = GameConfig {
        pipe_spacing: base.max_pipe_spacing() - 1.0,
        score_cutoff: 4,
        ..base
    };
    let mut episode = Episode::with_seed(config, FieldSeed::from_u64(2)).unwrap();
    let mut genomes = [Stub::new(0, Rule::Hover)];
    episode.reset_for_genomes(&mut genomes, 0);
    while episode.tick(&mut genomes, &[]).is_running() {
        assert!(episode.field().nearest().is_some());
    }
    let summary = episode.summary();
    assert_eq!(summary.termination, Termination::ScoreCutoff);
    assert_eq!(summary.scores, vec![5]);
}

#[test]
fn test_stop_between_ticks() {
    let config = GameConfig::default();
    let mut episode = Episode::with_seed(config, FieldSeed::from_u64(0)).unwrap();
    let mut genomes = [Stub::new(0, Rule::Hover)];
    episode.reset_for_genomes(&mut genomes, 0);
    for _ in 0..5 {
        episode.tick(&mut genomes, &[]);
    }
    let fitness = genomes[0].fitness();

    episode.stop();
    assert_eq!(episode.state(), EpisodeState::Done);
    assert_eq!(episode.termination(), Some(Termination::Stopped));
    assert_eq!(episode.tick(&mut genomes, &[]), EpisodeState::Done);
    assert_eq!(episode.ticks(), 5);
    assert_eq!(genomes[0].fitness(), fitness);
    assert!(episode.agents()[0].is_alive());

    episode.reset_for_genomes(&mut genomes, 1);
    assert_eq!(episode.state(), EpisodeState::Running);
    assert_eq!(genomes[0].fitness(), 0.0);
}

#[test]
fn test_observer_break_stops_run() {
    let mut episode = Episode::with_seed(wide_gap_config(), FieldSeed::from_u64(0)).unwrap();
    let mut genomes = [Stub::new(0, Rule::Hover)];
    episode.reset_for_genomes(&mut genomes, 0);
    let summary = episode.run(&mut genomes, |snapshot| {
        if snapshot.ticks() == 20 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    assert_eq!(summary.termination, Termination::Stopped);
    assert_eq!(summary.ticks, 20);
}

#[test]
fn test_same_seed_same_outcome() {
    let run = || {
        let mut episode = Episode::with_seed(GameConfig::default(), FieldSeed::from_u64(42)).unwrap();
        let mut genomes = [Stub::new(0, Rule::Flap), Stub::new(1, Rule::Fall)];
        episode.reset_for_genomes(&mut genomes, 0);
        let summary = episode.run(&mut genomes, |_| ControlFlow::Continue(()));
        (summary, genomes.map(|genome| genome.fitness()))
    };
    assert_eq!(run(), run());
}

#[test]
fn test_snapshot_reflects_episode() {
    let config = GameConfig::default();
    let mut episode = Episode::with_seed(config, FieldSeed::from_u64(0)).unwrap();
    let mut genomes = [Stub::new(0, Rule::Hover), Stub::new(1, Rule::Fall)];
    episode.reset_for_genomes(&mut genomes, 7);
    while episode.agents()[1].is_alive() {
        episode.tick(&mut genomes, &[]);
    }

    let snapshot = episode.snapshot();
    assert_eq!(snapshot.generation(), 7);
    assert_eq!(snapshot.ticks(), episode.ticks());
    assert_eq!(snapshot.alive_count(), 1);
    assert_eq!(snapshot.pairs().count(), 1);
    let [ceiling, ground] = snapshot.land_bands();
    assert_eq!(ceiling.height, config.land_thickness);
    assert_eq!(ground.bottom(), config.screen_height);
}

proptest! {
    #[test]
    fn prop_agents_stay_within_screen(
        seed in any::<u64>(),
        presses in prop::collection::vec(any::<bool>(), 1..300),
    ) {
        let config = GameConfig::default();
        let mut episode = Episode::with_seed(config, FieldSeed::from_u64(seed)).unwrap();
        let mut genomes = [Stub::new(0, Rule::Flap)];
        episode.reset(
            [InputSource::human(), InputSource::controller(0)],
            &mut genomes,
            0,
        );
        for pressed in presses {
            episode.tick(&mut genomes, &[pressed]);
            for agent in episode.agents() {
                let rect = agent.rect();
                prop_assert!(rect.top >= 0.0);
                prop_assert!(rect.bottom() <= config.screen_height);
            }
        }
    }

    #[test]
    fn prop_scores_never_decrease_and_reset(seed in any::<u64>(), ticks in 1usize..600) {
        let mut episode = Episode::with_seed(wide_gap_config(), FieldSeed::from_u64(seed)).unwrap();
        let mut genomes = [Stub::new(0, Rule::Hover), Stub::new(1, Rule::Fall)];
        episode.reset_for_genomes(&mut genomes, 0);

        let mut previous = vec![0; 2];
        for _ in 0..ticks {
            episode.tick(&mut genomes, &[]);
            let scores: Vec<u32> = episode.agents().iter().map(|agent| agent.score()).collect();
            for (now, before) in scores.iter().zip(&previous) {
                prop_assert!(now >= before);
            }
            previous = scores;
        }

        episode.reset_for_genomes(&mut genomes, 1);
        prop_assert!(episode.agents().iter().all(|agent| agent.score() == 0 && agent.is_alive()));
        prop_assert!(genomes.iter().all(|genome| genome.fitness() == 0.0));
    }
}
