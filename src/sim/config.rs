//! Game tuning
//!
//! Defaults come from [`crate::consts`]; a JSON file can override any subset.

use serde::{Deserialize, Serialize};

use super::grid::Cell;
use crate::consts::*;

/// Invalid tuning values
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Grid must have at least one tile per side
    EmptyGrid(i32),
    /// Start cell lies outside the grid
    StartOutOfBounds(Cell),
    /// Tick floor above the initial interval, or zero
    BadInterval { initial_ms: u32, min_ms: u32 },
    /// Probability outside 0..=1
    BadProbability(f64),
    /// A step that must be positive was zero
    ZeroStep(&'static str),
    /// Malformed JSON
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyGrid(n) => write!(f, "grid tile count must be positive, got {}", n),
            Self::StartOutOfBounds(c) => {
                write!(f, "start cell ({}, {}) is outside the grid", c.x, c.y)
            }
            Self::BadInterval { initial_ms, min_ms } => write!(
                f,
                "tick interval floor {}ms must be positive and not above initial {}ms",
                min_ms, initial_ms
            ),
            Self::BadProbability(p) => write!(f, "probability {} is outside 0..=1", p),
            Self::ZeroStep(name) => write!(f, "{} must be positive", name),
            Self::Parse(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Tunable rules of a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Tiles per side of the square board
    pub grid_tiles: i32,
    /// Where the one-segment snake starts
    pub start: Cell,
    /// Points per food
    pub food_score: u32,
    /// First tick period
    pub initial_interval_ms: u32,
    /// Period reduction per food
    pub interval_step_ms: u32,
    /// Period floor
    pub min_interval_ms: u32,
    /// One obstacle per this many points
    pub obstacle_score_step: u32,
    /// Score from which obstacles start to wander
    pub obstacle_move_score: u32,
    /// Per-tick chance that an obstacle tries to move
    pub obstacle_move_chance: f64,
    /// Direction draws per move attempt
    pub obstacle_move_attempts: u32,
    /// Rejection-sampling cap before the spawner scans for free cells
    pub spawn_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_tiles: GRID_TILE_COUNT,
            start: Cell::new(GRID_TILE_COUNT / 2, GRID_TILE_COUNT / 2),
            food_score: FOOD_SCORE,
            initial_interval_ms: INITIAL_TICK_MS,
            interval_step_ms: TICK_STEP_MS,
            min_interval_ms: MIN_TICK_MS,
            obstacle_score_step: OBSTACLE_SCORE_STEP,
            obstacle_move_score: OBSTACLE_MOVE_SCORE,
            obstacle_move_chance: OBSTACLE_MOVE_CHANCE,
            obstacle_move_attempts: OBSTACLE_MOVE_ATTEMPTS,
            spawn_attempts: SPAWN_ATTEMPTS,
        }
    }
}

impl GameConfig {
    /// Default rules on a custom board, snake starting in the middle
    pub fn with_grid(tiles: i32) -> Self {
        Self {
            grid_tiles: tiles,
            start: Cell::new(tiles / 2, tiles / 2),
            ..Default::default()
        }
    }

    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_tiles <= 0 {
            return Err(ConfigError::EmptyGrid(self.grid_tiles));
        }
        if !self.start.in_bounds(self.grid_tiles) {
            return Err(ConfigError::StartOutOfBounds(self.start));
        }
        if self.min_interval_ms == 0 || self.min_interval_ms > self.initial_interval_ms {
            return Err(ConfigError::BadInterval {
                initial_ms: self.initial_interval_ms,
                min_ms: self.min_interval_ms,
            });
        }
        if !(0.0..=1.0).contains(&self.obstacle_move_chance) {
            return Err(ConfigError::BadProbability(self.obstacle_move_chance));
        }
        if self.food_score == 0 {
            return Err(ConfigError::ZeroStep("food_score"));
        }
        if self.obstacle_score_step == 0 {
            return Err(ConfigError::ZeroStep("obstacle_score_step"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_tiles, 20);
        assert_eq!(config.start, Cell::new(10, 10));
        assert_eq!(config.min_interval_ms, 50);
        assert_eq!(config.interval_step_ms, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_override() {
        let config = GameConfig::from_json(r#"{ "grid_tiles": 12, "start": { "x": 1, "y": 2 } }"#)
            .expect("valid override");
        assert_eq!(config.grid_tiles, 12);
        assert_eq!(config.start, Cell::new(1, 2));
        assert_eq!(config.food_score, FOOD_SCORE);
    }

    #[test]
    fn test_invalid_configs() {
        let mut config = GameConfig::with_grid(0);
        assert_eq!(config.validate(), Err(ConfigError::EmptyGrid(0)));

        config = GameConfig::with_grid(5);
        config.start = Cell::new(5, 0);
        assert!(matches!(config.validate(), Err(ConfigError::StartOutOfBounds(_))));

        config = GameConfig::default();
        config.min_interval_ms = config.initial_interval_ms + 1;
        assert!(matches!(config.validate(), Err(ConfigError::BadInterval { .. })));

        config = GameConfig::default();
        config.obstacle_move_chance = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::BadProbability(_))));

        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
