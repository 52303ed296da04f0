use crate::{
    GameConfig,
    core::{Agent, Genome},
};

use super::obstacle_field::ObstacleField;

/// Reward and penalty rules applied to fitness accumulators.
///
/// | event | amount |
/// |-------|--------|
/// | each tick alive | `survival_per_second / tick_rate` |
/// | obstacle-pair cleared | `clear` |
/// | collision (once) | `collision` |
///
/// Only genome-driven agents have an accumulator; human agents still score
/// points but receive no reward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessAccountant {
    survival_increment: f32,
    clear_reward: f32,
    collision_penalty: f32,
}

impl FitnessAccountant {
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            survival_increment: config.survival_increment(),
            clear_reward: config.rewards.clear,
            collision_penalty: config.rewards.collision,
        }
    }

    #[must_use]
    pub fn survival_increment(&self) -> f32 {
        self.survival_increment
    }

    #[must_use]
    pub fn clear_reward(&self) -> f32 {
        self.clear_reward
    }

    #[must_use]
    pub fn collision_penalty(&self) -> f32 {
        self.collision_penalty
    }

    pub fn reward_survival<G>(&self, agent: &Agent, genomes: &mut [G])
    where
        G: Genome,
    {
        if let Some(genome) = genome_of(agent, genomes) {
            *genome.fitness_mut() += self.survival_increment;
        }
    }

    pub fn penalize_collision<G>(&self, agent: &Agent, genomes: &mut [G])
    where
        G: Genome,
    {
        if let Some(genome) = genome_of(agent, genomes) {
            *genome.fitness_mut() += self.collision_penalty;
        }
    }

    /// Credits a clear once the lead live agent has passed the nearest pair.
    ///
    /// The lead agent is the first live agent in binding order. When its
    /// left edge is past the right edge of the nearest live pair, every
    /// live agent scores a point and earns the clear reward, and the pair moves
    /// to the passed queue. Returns `true` if a pair was cleared.
    pub fn settle_clear<G>(
        &self,
        field: &mut ObstacleField,
        agents: &mut [Agent],
        genomes: &mut [G],
    ) -> bool
    where
        G: Genome,
    {
        let Some(lead) = agents.iter().find(|agent| agent.is_alive()) else {
            return false;
        };
        let Some(nearest) = field.nearest() else {
            return false;
        };
        if nearest.right() >= lead.rect().left {
            return false;
        }

        for agent in agents.iter_mut().filter(|agent| agent.is_alive()) {
            agent.add_score();
            if let Some(genome) = genome_of(agent, genomes) {
                *genome.fitness_mut() += self.clear_reward;
            }
        }
        field.pass_nearest();
        true
    }
}

fn genome_of<'a, G>(agent: &Agent, genomes: &'a mut [G]) -> Option<&'a mut G> {
    agent
        .input()
        .genome_index()
        .and_then(|index| genomes.get_mut(index))
}

#[cfg(test)]
mod tests {
    use crate::{CollisionKind, FieldSeed, GenomeId, InputSource, SensorInputs, core::Controller};

    use super::*;

    #[derive(Debug, Default)]
    struct Ledger {
        fitness: f32,
    }

    impl Controller for Ledger {
        fn evaluate(&self, _inputs: &SensorInputs) -> f32 {
            0.0
        }
    }

    impl Genome for Ledger {
        fn id(&self) -> GenomeId {
            GenomeId(0)
        }

        fn fitness(&self) -> f32 {
            self.fitness
        }

        fn fitness_mut(&mut self) -> &mut f32 {
            &mut self.fitness
        }
    }

    #[test]
    fn test_amounts_follow_config() {
        let config = GameConfig {
            tick_rate: 60,
            ..GameConfig::default()
        };
        let accountant = FitnessAccountant::new(&config);
        assert!((accountant.survival_increment() - 0.05).abs() < 1e-7);
        assert_eq!(accountant.clear_reward(), 5.0);
        assert_eq!(accountant.collision_penalty(), -1.0);
    }

    #[test]
    fn test_human_agents_have_no_accumulator() {
        let config = GameConfig::default();
        let accountant = FitnessAccountant::new(&config);
        let mut genomes = [Ledger::default()];
        let human = Agent::new(&config, InputSource::human());
        accountant.reward_survival(&human, &mut genomes);
        accountant.penalize_collision(&human, &mut genomes);
        assert_eq!(genomes[0].fitness, 0.0);
    }

    #[test]
    fn test_clear_requires_lead_agent_past_trailing_edge() {
        let config = GameConfig::default();
        let accountant = FitnessAccountant::new(&config);
        let mut field = ObstacleField::with_seed(config, FieldSeed::from_u64(0)).unwrap();
        let mut agents = vec![
            Agent::new(&config, InputSource::controller(0)),
            Agent::new(&config, InputSource::controller(1)),
        ];
        let mut genomes = [Ledger::default(), Ledger::default()];
        field.spawn_at(300.0);

        let lead_left = agents[0].rect().left;
        while field.nearest().unwrap().right() >= lead_left {
            assert!(!accountant.settle_clear(&mut field, &mut agents, &mut genomes));
            field.advance();
        }
        assert!(accountant.settle_clear(&mut field, &mut agents, &mut genomes));
        assert!(field.live().is_empty());
        assert_eq!(field.passed().len(), 1);
        for (agent, genome) in agents.iter().zip(&genomes) {
            assert_eq!(agent.score(), 1);
            assert_eq!(genome.fitness, 5.0);
        }

        assert!(
            !accountant.settle_clear(&mut field, &mut agents, &mut genomes),
            "a pair is cleared only once"
        );
    }

    #[test]
    fn test_dead_agents_are_not_rewarded_for_clears() {
        let config = GameConfig::default();
        let accountant = FitnessAccountant::new(&config);
        let mut field = ObstacleField::with_seed(config, FieldSeed::from_u64(0)).unwrap();
        let mut agents = vec![
            Agent::new(&config, InputSource::controller(0)),
            Agent::new(&config, InputSource::controller(1)),
        ];
        agents[0].kill(CollisionKind::Obstacle);
        let mut genomes = [Ledger::default(), Ledger::default()];
        field.spawn_at(300.0);
        while !accountant.settle_clear(&mut field, &mut agents, &mut genomes) {
            field.advance();
        }
        assert_eq!(agents[0].score(), 0);
        assert_eq!(genomes[0].fitness, 0.0);
        assert_eq!(agents[1].score(), 1);
        assert_eq!(genomes[1].fitness, 5.0);
    }
}
