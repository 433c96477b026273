//! Wrap Snake - a grid snake game on a wrap-around board
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, spawning, difficulty)
//! - `session`: Owns a game and fans tick events out to its collaborators
//! - `clock`: Periodic tick drivers (manual and `setInterval`)
//! - `highscores`: Best-score persistence
//! - `settings`: Player preferences
//! - `audio` / `renderer`: Web Audio and 2D canvas sinks (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod clock;
pub mod highscores;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::{HighScoreStore, MemoryStore};
pub use session::{AudioCue, AudioSink, Command, RenderSink, Runner, Session};
pub use settings::{Palette, Settings};

/// Game configuration constants
pub mod consts {
    /// Tiles per side of the board
    pub const GRID_TILE_COUNT: i32 = 20;

    /// Points per food
    pub const FOOD_SCORE: u32 = 10;

    /// Tick period at the start of a run (ms)
    pub const INITIAL_TICK_MS: u32 = 150;
    /// Period reduction per food (ms)
    pub const TICK_STEP_MS: u32 = 5;
    /// Period floor (ms)
    pub const MIN_TICK_MS: u32 = 50;

    /// One obstacle per this many points
    pub const OBSTACLE_SCORE_STEP: u32 = 50;
    /// Obstacles start wandering at this score
    pub const OBSTACLE_MOVE_SCORE: u32 = 200;
    pub const OBSTACLE_MOVE_CHANCE: f64 = 0.2;
    pub const OBSTACLE_MOVE_ATTEMPTS: u32 = 10;

    /// Rejection-sampling cap before falling back to a free-cell scan
    pub const SPAWN_ATTEMPTS: u32 = 1000;
}
