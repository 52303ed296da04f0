//! Side-scrolling obstacle-avoidance simulation shared by many agents.
//!
//! Agents fall under gravity, issue upward impulses and try to fly through the
//! gaps of obstacle-pairs scrolling in from the right. An [`Episode`] runs all
//! agents against one shared [`ObstacleField`] until every agent has crashed,
//! crediting rewards to the fitness accumulator of each agent's [`Genome`].
//!
//! Genome evolution lives in a separate crate; this crate only defines the
//! [`Controller`] and [`Genome`] contracts it consumes.

pub use self::{config::*, core::*, engine::*};

pub mod config;
pub mod core;
pub mod engine;
