//! # Goldwing
//!
//! Deterministic simulation core for the Goldwing family of idle canvas
//! mini-games: a gold collector, a pointer-follow courier, and four
//! tower-defense/clicker hybrids, all served by one simulation
//! parameterized per variant.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        GOLDWING CORE                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── vec2.rs     - f64 screen-space vector                   │
//! │  └── rng.rs      - Seeded Xorshift128+ PRNG                  │
//! │                                                              │
//! │  game/           - Simulation (single logical thread)        │
//! │  ├── config.rs   - Six variant presets                       │
//! │  ├── state.rs    - Owned state + entity records              │
//! │  ├── tick.rs     - Ordered simulation step                   │
//! │  ├── spawn.rs    - Interval/cap-gated spawning               │
//! │  ├── combat.rs   - Taps, crits, kills, breaches              │
//! │  ├── soldier.rs  - Auto-attackers                            │
//! │  └── session.rs  - Load / persist / purchase                 │
//! │                                                              │
//! │  economy/        - Upgrades and derived stats                │
//! │  persist/        - Scalar key/value store collaborators      │
//! │  render.rs       - Read-only render pass over a Surface      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Frame Contract
//!
//! The host's frame driver calls [`Game::tick`] once per display
//! refresh with an explicit `dt`. Within a frame, simulate fully
//! completes - including every persistence write - before render
//! observes state, and render never mutates anything.
//!
//! ## Determinism
//!
//! All randomness flows through a seeded Xorshift128+ RNG owned by the
//! state and time is an explicit parameter, so identical seed + inputs
//! + dts replay identically. That keeps every simulation path testable;
//! externally verified replay is not a goal.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod economy;
pub mod game;
pub mod persist;
pub mod render;

// Re-export commonly used types
pub use crate::core::rng::GameRng;
pub use crate::core::vec2::Vec2;
pub use economy::{DerivedStats, UpgradeKind, UpgradeSet};
pub use game::{EventData, FrameInput, Game, GameConfig, GameEvent, GameState};
pub use persist::{FileStore, MemoryStore, Store};
pub use render::Surface;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Nominal display refresh rate the demo driver targets (Hz)
pub const TICK_RATE: u32 = 60;

/// Frame duration at the nominal tick rate, seconds
pub const FRAME_DT: f64 = 1.0 / TICK_RATE as f64;
