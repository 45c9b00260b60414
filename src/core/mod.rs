//! Physics kernel for balls bouncing in a 2D box.
//!
//! - `config`: immutable box bounds, time step and collision diameter
//! - `particle`: per-particle integration and wall reflection
//! - `collision`: pairwise overlap detection and elastic resolution
//! - `sim`: the simulation container driving `step()`

pub mod collision;
pub mod config;
pub mod particle;
pub mod sim;

pub use collision::resolve_collisions;
pub use config::BoxConfig;
pub use particle::{Particle, DIM};
pub use sim::Simulation;
