//! Genetic algorithm over neural controller weights.
//!
//! [`Population`] implements [`Optimizer`] with a classic generational GA:
//!
//! 1. **Rank** - Individuals are sorted by the fitness accumulated during the episode
//! 2. **Elite Selection** - The top individuals are copied unchanged
//! 3. **Tournament Selection** - Parents are picked as the fittest of a random sample
//! 4. **Crossover (BLX-α)** - Two parents' weight vectors are blended
//! 5. **Mutation** - Gaussian noise is added to some weights
//!
//! The best individual ever seen is kept aside, so a lucky generation is never
//! lost to a bad reproduction step.
//!
//! # Parameter Schedule
//!
//! [`EvolverSchedule::Phased`] changes mutation strength with the generation
//! number ([`EvolutionPhase`]): wide exploration first, fine-tuning later.
//! [`EvolverSchedule::Fixed`] uses one [`PopulationEvolver`] for every generation.

use flappy_engine::{Controller, Genome, GenomeId, SensorInputs};
use rand::{Rng, SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg32;

use crate::{network::NeuralController, optimizer::Optimizer, weights};

/// One candidate solution: a network, its identity and its fitness accumulator.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    id: GenomeId,
    controller: NeuralController,
    fitness: f32,
}

impl Individual {
    #[must_use]
    pub fn new(id: GenomeId, controller: NeuralController) -> Self {
        Self {
            id,
            controller,
            fitness: 0.0,
        }
    }

    #[must_use]
    pub fn controller(&self) -> &NeuralController {
        &self.controller
    }

    #[must_use]
    pub fn into_controller(self) -> NeuralController {
        self.controller
    }
}

impl Controller for Individual {
    fn evaluate(&self, inputs: &SensorInputs) -> f32 {
        self.controller.evaluate(inputs)
    }
}

impl Genome for Individual {
    fn id(&self) -> GenomeId {
        self.id
    }

    fn fitness(&self) -> f32 {
        self.fitness
    }

    fn fitness_mut(&mut self) -> &mut f32 {
        &mut self.fitness
    }
}

/// Parameters of one reproduction step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationEvolver {
    /// Number of top individuals preserved unchanged (elitism)
    pub elite_count: usize,
    /// Weights are clamped to `[-max_weight, max_weight]`
    pub max_weight: f32,
    /// Tournament size for selection (larger = stronger selection pressure)
    pub tournament_size: usize,
    /// Standard deviation of the Gaussian mutation noise
    pub mutation_sigma: f32,
    /// BLX-α crossover parameter
    pub blx_alpha: f32,
    /// Probability of mutating each weight
    pub mutation_rate: f32,
}

impl PopulationEvolver {
    /// Creates the next generation.
    ///
    /// `ranked` must be sorted by fitness, best first. Elites keep their id;
    /// every child gets a fresh id from `next_id`. All fitness accumulators of
    /// the returned generation are zero.
    #[must_use]
    pub fn evolve<R>(
        &self,
        ranked: &[Individual],
        next_id: &mut u64,
        rng: &mut R,
    ) -> Vec<Individual>
    where
        R: Rng + ?Sized,
    {
        debug_assert!(ranked.is_sorted_by(|a, b| a.fitness >= b.fitness));

        let mut next: Vec<Individual> = ranked
            .iter()
            .take(self.elite_count)
            .map(|elite| Individual::new(elite.id, elite.controller.clone()))
            .collect();

        while next.len() < ranked.len() {
            let (Some(p1), Some(p2)) = (
                tournament_select(ranked, self.tournament_size, rng),
                tournament_select(ranked, self.tournament_size, rng),
            ) else {
                break;
            };

            let mut child = weights::blx_alpha(
                p1.controller.weights(),
                p2.controller.weights(),
                self.blx_alpha,
                self.max_weight,
                rng,
            );
            weights::mutate(
                &mut child,
                self.mutation_sigma,
                self.max_weight,
                self.mutation_rate,
                rng,
            );

            let id = GenomeId(*next_id);
            *next_id += 1;
            next.push(Individual::new(id, NeuralController::with_weights(child)));
        }
        next
    }
}

/// Stage of a training run, derived from the generation number.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum EvolutionPhase {
    #[default]
    Exploration,
    Transition,
    Convergence,
}

impl EvolutionPhase {
    #[must_use]
    pub fn from_generation(generation: usize) -> Self {
        match generation {
            0..20 => Self::Exploration,
            20..60 => Self::Transition,
            _ => Self::Convergence,
        }
    }

    #[must_use]
    pub const fn evolver(self) -> PopulationEvolver {
        let (mutation_sigma, mutation_rate) = match self {
            Self::Exploration => (0.5, 0.3),
            Self::Transition => (0.2, 0.2),
            Self::Convergence => (0.05, 0.1),
        };
        PopulationEvolver {
            elite_count: ELITE_COUNT,
            max_weight: MAX_WEIGHT,
            tournament_size: TOURNAMENT_SIZE,
            mutation_sigma,
            blx_alpha: BLX_ALPHA,
            mutation_rate,
        }
    }
}

const ELITE_COUNT: usize = 2;
const TOURNAMENT_SIZE: usize = 3;
const BLX_ALPHA: f32 = 0.2;

/// Bound of initial and evolved weights.
pub const MAX_WEIGHT: f32 = 4.0;

/// How the evolver parameters are chosen per generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvolverSchedule {
    Fixed(PopulationEvolver),
    Phased,
}

impl EvolverSchedule {
    #[must_use]
    pub fn evolver(&self, generation: usize) -> PopulationEvolver {
        match self {
            Self::Fixed(evolver) => *evolver,
            Self::Phased => EvolutionPhase::from_generation(generation).evolver(),
        }
    }
}

/// Population of neural controllers evolved by a genetic algorithm.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
    best: Option<Individual>,
    schedule: EvolverSchedule,
    fitness_target: Option<f32>,
    generation: usize,
    next_id: u64,
    rng: Pcg32,
}

impl Population {
    /// Creates `count` individuals with random weights in `[-MAX_WEIGHT, MAX_WEIGHT]`.
    ///
    /// The population's own random number generator is seeded from `rng`, so a
    /// seeded `rng` makes the whole evolution reproducible.
    pub fn random<R>(count: usize, schedule: EvolverSchedule, rng: &mut R) -> Self
    where
        R: Rng,
    {
        let mut rng = Pcg32::from_rng(rng);
        let individuals = (0..count as u64)
            .map(|id| {
                let controller = NeuralController::random(&mut rng, MAX_WEIGHT);
                Individual::new(GenomeId(id), controller)
            })
            .collect();
        Self {
            individuals,
            best: None,
            schedule,
            fitness_target: None,
            generation: 0,
            next_id: count as u64,
            rng,
        }
    }

    /// Stops training once an individual reaches `target` fitness.
    #[must_use]
    pub fn with_fitness_target(self, target: Option<f32>) -> Self {
        Self {
            fitness_target: target,
            ..self
        }
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Best individual of all completed generations, with the fitness it reached.
    #[must_use]
    pub fn best(&self) -> Option<&Individual> {
        self.best.as_ref()
    }

    /// Number of completed reproduction steps.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    fn rank(&mut self) {
        self.individuals
            .sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        if let Some(top) = self.individuals.first()
            && self.best.as_ref().is_none_or(|best| top.fitness > best.fitness)
        {
            log::debug!(
                "new best individual {} with fitness {:.3}",
                top.id,
                top.fitness
            );
            self.best = Some(top.clone());
        }
    }
}

impl Optimizer for Population {
    type Genome = Individual;

    fn genomes(&self) -> &[Individual] {
        &self.individuals
    }

    fn genomes_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    fn reproduce(&mut self) {
        self.rank();
        let evolver = self.schedule.evolver(self.generation);
        self.individuals = evolver.evolve(&self.individuals, &mut self.next_id, &mut self.rng);
        self.generation += 1;
    }

    fn is_satisfied(&self) -> bool {
        match (self.fitness_target, &self.best) {
            (Some(target), Some(best)) => best.fitness >= target,
            _ => false,
        }
    }
}

/// Returns the fittest of `tournament_size` distinct random individuals.
fn tournament_select<'a, R>(
    population: &'a [Individual],
    tournament_size: usize,
    rng: &mut R,
) -> Option<&'a Individual>
where
    R: Rng + ?Sized,
{
    population
        .choose_multiple(rng, tournament_size.max(1))
        .max_by(|a, b| a.fitness.total_cmp(&b.fitness))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(11)
    }

    fn ranked_population(fitness: &[f32]) -> Vec<Individual> {
        let mut rng = rng();
        fitness
            .iter()
            .zip(0..)
            .map(|(&fitness, id)| Individual {
                id: GenomeId(id),
                controller: NeuralController::random(&mut rng, MAX_WEIGHT),
                fitness,
            })
            .collect()
    }

    #[test]
    fn test_evolve_keeps_size_and_elites() {
        let ranked = ranked_population(&[9.0, 7.0, 5.0, 3.0, 1.0, 0.0]);
        let evolver = EvolutionPhase::Exploration.evolver();
        let mut next_id = 100;
        let next = evolver.evolve(&ranked, &mut next_id, &mut rng());

        assert_eq!(next.len(), ranked.len());
        assert_eq!(next[0].id(), ranked[0].id());
        assert_eq!(next[0].controller(), ranked[0].controller());
        assert_eq!(next[1].id(), ranked[1].id());
        assert!(next.iter().all(|ind| ind.fitness() == 0.0));
        let child_ids: Vec<u64> = next[ELITE_COUNT..].iter().map(|ind| ind.id().0).collect();
        assert_eq!(child_ids, vec![100, 101, 102, 103]);
        assert_eq!(next_id, 104);
    }

    #[test]
    fn test_children_stay_within_bounds() {
        let ranked = ranked_population(&[3.0, 2.0, 1.0, 0.0]);
        let evolver = PopulationEvolver {
            elite_count: 0,
            max_weight: 1.0,
            tournament_size: 2,
            mutation_sigma: 5.0,
            blx_alpha: 0.5,
            mutation_rate: 1.0,
        };
        let next = evolver.evolve(&ranked, &mut 0, &mut rng());
        for ind in &next {
            assert!(ind.controller().weights().iter().all(|w| (-1.0..=1.0).contains(w)));
        }
    }

    #[test]
    fn test_tournament_of_whole_population_picks_best() {
        let ranked = ranked_population(&[1.0, 8.0, 3.0]);
        let winner = tournament_select(&ranked, ranked.len(), &mut rng()).unwrap();
        assert_eq!(winner.fitness(), 8.0);
        assert!(tournament_select(&[], 2, &mut rng()).is_none());
    }

    #[test]
    fn test_phase_schedule() {
        assert_eq!(EvolutionPhase::from_generation(0), EvolutionPhase::Exploration);
        assert_eq!(EvolutionPhase::from_generation(20), EvolutionPhase::Transition);
        assert_eq!(EvolutionPhase::from_generation(500), EvolutionPhase::Convergence);
        let early = EvolverSchedule::Phased.evolver(0);
        let late = EvolverSchedule::Phased.evolver(100);
        assert!(early.mutation_sigma > late.mutation_sigma);
    }

    #[test]
    fn test_reproduce_tracks_best_ever() {
        let mut population = Population::random(5, EvolverSchedule::Phased, &mut rng())
            .with_fitness_target(Some(10.0));
        for (i, genome) in population.genomes_mut().iter_mut().enumerate() {
            #[expect(clippy::cast_precision_loss)]
            let fitness = i as f32;
            *genome.fitness_mut() = fitness;
        }
        let best_id = population.genomes()[4].id();

        population.reproduce();
        assert_eq!(population.generation(), 1);
        assert_eq!(population.genomes().len(), 5);
        assert_eq!(population.best().map(Genome::id), Some(best_id));
        assert_eq!(population.best().map(Genome::fitness), Some(4.0));
        assert!(!population.is_satisfied());

        // a worse generation does not replace the best
        for genome in population.genomes_mut() {
            *genome.fitness_mut() = 1.0;
        }
        population.reproduce();
        assert_eq!(population.best().map(Genome::id), Some(best_id));

        population.genomes_mut()[3].fitness = 12.0;
        population.reproduce();
        assert!(population.is_satisfied());
        assert_eq!(population.best().map(Genome::fitness), Some(12.0));
    }

    #[test]
    fn test_same_seed_same_population() {
        let a = Population::random(4, EvolverSchedule::Phased, &mut rng());
        let b = Population::random(4, EvolverSchedule::Phased, &mut rng());
        assert_eq!(a.individuals(), b.individuals());
    }

    #[test]
    fn test_no_target_never_satisfied() {
        let mut population = Population::random(2, EvolverSchedule::Phased, &mut rng());
        population.genomes_mut()[0].fitness = f32::MAX;
        population.reproduce();
        assert!(!population.is_satisfied());
    }

    proptest! {
        #[test]
        fn prop_evolve_keeps_size_and_weight_bounds(
            seed in any::<u64>(),
            generation in 0usize..500,
            mut fitness in prop::collection::vec(-100.0f32..100.0, 1..24),
        ) {
            fitness.sort_by(|a, b| b.total_cmp(a));
            let mut rng = Pcg32::seed_from_u64(seed);
            let ranked: Vec<Individual> = fitness
                .iter()
                .zip(0..)
                .map(|(&fitness, id)| Individual {
                    id: GenomeId(id),
                    controller: NeuralController::random(&mut rng, MAX_WEIGHT),
                    fitness,
                })
                .collect();

            let mut next_id = 1000;
            let next = EvolverSchedule::Phased
                .evolver(generation)
                .evolve(&ranked, &mut next_id, &mut rng);

            prop_assert_eq!(next.len(), ranked.len());
            for ind in &next {
                prop_assert_eq!(ind.fitness(), 0.0);
                prop_assert!(
                    ind.controller()
                        .weights()
                        .iter()
                        .all(|w| (-MAX_WEIGHT..=MAX_WEIGHT).contains(w))
                );
            }
            let children = next.iter().filter(|ind| ind.id().0 >= 1000).count() as u64;
            prop_assert_eq!(next_id, 1000 + children);
        }
    }
}
