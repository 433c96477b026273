//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tile per tick, driven by an external clock
//! - Randomness only through an injected `RandomSource`
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod config;
pub mod difficulty;
pub mod grid;
pub mod motion;
pub mod obstacles;
pub mod spawn;
pub mod state;
pub mod tick;

pub use config::{ConfigError, GameConfig};
pub use difficulty::{FoodOutcome, on_food_eaten};
pub use grid::{Cell, Direction, RandomSource};
pub use obstacles::DriftRules;
pub use spawn::SpawnError;
pub use state::{
    CollisionKind, EndReason, GameEvent, GamePhase, GameState, Snake, Snapshot,
};
pub use tick::{restart, start, steer, tick, toggle_pause};
