//! Core deterministic primitives.
//!
//! Everything the simulation depends on for replayable behavior: a plain
//! f64 screen-space vector and a seeded PRNG. No wall-clock reads, no
//! ambient entropy.

pub mod rng;
pub mod vec2;
