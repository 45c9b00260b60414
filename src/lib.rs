//! # ballbox
//!
//! Balls moving with constant velocity inside a rectangular box, reflecting off
//! the walls and exchanging momentum when they overlap.
//!
//! The kernel lives in [`core`]; rendering and animation are left to the caller,
//! which drives [`core::Simulation::step`] and reads back positions. With the
//! `python` feature the kernel is also exposed as the `ballbox.BallBox` class.

pub mod core;
pub mod error;

#[cfg(feature = "python")]
mod python;
