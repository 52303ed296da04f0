//! Generational training of neural controllers.
//!
//! This crate repeats [`flappy_engine::Episode`]s across generations. Every
//! generation binds one agent to each genome of an [`Optimizer`], runs the
//! episode until all agents are dead, and hands the accumulated fitness back to
//! the optimizer, which produces the next generation.
//!
//! # How Training Works
//!
//! 1. **Bind** - One agent is created per genome; fitness accumulators are zeroed
//! 2. **Simulate** - The episode ticks until every agent crashed (or the score cutoff)
//! 3. **Report** - A [`GenerationReport`] summarizes fitness and score
//! 4. **Reproduce** - The optimizer builds the next generation from the fitness values
//! 5. **Repeat** - Until the generation limit or the optimizer is satisfied
//!
//! # Architecture
//!
//! ```text
//! GenerationalDriver
//!     ↓ owns
//! Episode (flappy-engine) ── borrows genomes of ──> Optimizer
//!     ↓ credits                                        ↑ reproduce()
//! fitness accumulators ────────────────────────────────┘
//! ```
//!
//! The driver only depends on the [`Optimizer`] trait. The built-in
//! [`Population`] is a genetic algorithm over the weights of a fixed-topology
//! [`NeuralController`]; see the [`genetic`] module.
//!
//! # Example
//!
//! ```
//! use flappy_engine::{FieldSeed, GameConfig};
//! use flappy_training::{EvolverSchedule, GenerationalDriver, Population};
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//!
//! let mut rng = Pcg32::seed_from_u64(0);
//! let population = Population::random(8, EvolverSchedule::Phased, &mut rng);
//! let mut driver = GenerationalDriver::new(GameConfig::default(), population, 2)?
//!     .with_seed(FieldSeed::from_u64(0));
//!
//! let outcome = driver.run(|_| std::ops::ControlFlow::Continue(()));
//! assert_eq!(outcome.reports.len(), 2);
//! assert_eq!(driver.generation(), 2);
//! # Ok::<(), flappy_engine::ConfigError>(())
//! ```

pub use self::{driver::*, genetic::*, network::*, optimizer::*, report::*};

mod driver;
pub mod genetic;
mod network;
mod optimizer;
mod report;
pub mod weights;
