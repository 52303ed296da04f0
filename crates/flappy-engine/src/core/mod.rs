//! Core data structures of the simulation.
//!
//! - [`Rect`] - Axis-aligned box used for all collision geometry
//! - [`ObstaclePair`] - Linked top/bottom obstacle sharing one gap
//! - [`Agent`] - One simulated actor with its vertical physics
//! - [`Controller`] / [`Genome`] - Contracts of the externally owned decision functions
//!
//! These types hold no episode-level state. The [`engine`](crate::engine) module
//! combines them into a running simulation.

pub use self::{agent::*, controller::*, geometry::*, obstacle::*};

mod agent;
mod controller;
mod geometry;
mod obstacle;
