//! Episode logic and per-tick coordination.
//!
//! This module combines the [`core`](crate::core) types into a running simulation:
//!
//! - [`ObstacleField`] - Spawns, scrolls and reaps obstacle-pairs
//! - [`FieldSeed`] - Seed for deterministic obstacle heights
//! - [`CollisionIndex`] - Tests agents against obstacles and land bands
//! - [`FitnessAccountant`] - Rewards and penalties credited to genomes
//! - [`Episode`] - The `Init -> Running -> Done` state machine driving one run
//! - [`Snapshot`] - Read-only view of an episode for renderers
//!
//! # Episode Flow
//!
//! 1. Create an [`Episode`] with a [`GameConfig`](crate::GameConfig)
//! 2. [`Episode::reset`] binds agents to genomes or human input and spawns the first pair
//! 3. [`Episode::tick`] advances everything by one fixed step
//! 4. The episode is done once every agent is dead, every live agent passed the
//!    score cutoff, or [`Episode::stop`] was called

pub use self::{
    collision::*, episode::*, field_seed::*, fitness::*, obstacle_field::*, snapshot::*,
};

mod collision;
mod episode;
mod field_seed;
mod fitness;
mod obstacle_field;
mod snapshot;
