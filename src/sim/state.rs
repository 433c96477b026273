//! Game state and core simulation types
//!
//! Everything a game needs between ticks lives in [`GameState`]; the random
//! source is owned by the caller so tests can script it.

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::config::GameConfig;
use super::grid::{Cell, Direction, RandomSource};
use super::spawn;

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fresh board, waiting for Start
    #[default]
    Idle,
    /// Ticks advance the simulation
    Running,
    /// Ticks are ignored
    Paused,
    /// Run ended; see [`GameState::end`]
    Over,
}

/// What the head ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    /// Head landed on its own body
    SelfBite,
    /// Head landed on an obstacle
    Obstacle,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    Collision(CollisionKind),
    /// No free tile was left for food or a new obstacle
    BoardFull,
}

/// Something observable that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    FoodEaten { at: Cell, score: u32 },
    ObstacleSpawned(Cell),
    /// Number of obstacles that drifted this tick
    ObstaclesMoved(usize),
    /// Tick period changed; the clock must be rescheduled
    SpeedChanged { interval_ms: u32 },
    NewHighScore(u32),
    GameOver { score: u32, reason: EndReason },
}

/// The snake body, head first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// One-segment snake
    pub fn new(head: Cell) -> Self {
        Self {
            body: VecDeque::from([head]),
        }
    }

    /// Build from explicit segments (head first); `None` when empty
    pub fn from_segments(segments: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let body: VecDeque<Cell> = segments.into_iter().collect();
        (!body.is_empty()).then_some(Self { body })
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// True if `cell` is any segment other than the head
    pub fn body_contains(&self, cell: Cell) -> bool {
        self.body.iter().skip(1).any(|&c| c == cell)
    }

    pub(crate) fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
    }

    /// Drop the tail unless it is the only segment
    pub(crate) fn pop_tail(&mut self) -> Option<Cell> {
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }

    pub fn to_vec(&self) -> Vec<Cell> {
        self.body.iter().copied().collect()
    }
}

/// Read-only view handed to render sinks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub grid_tiles: i32,
    pub snake: Vec<Cell>,
    pub food: Option<Cell>,
    pub obstacles: Vec<Cell>,
    pub score: u32,
    pub high_score: u32,
    pub phase: GamePhase,
    pub end: Option<EndReason>,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    pub phase: GamePhase,
    /// Set when `phase` is `Over`
    pub end: Option<EndReason>,
    pub snake: Snake,
    /// Heading used by the next tick
    pub direction: Direction,
    /// Heading of the last executed move; reversal checks compare against it
    pub last_moved: Direction,
    /// Only `None` once the board has filled up
    pub food: Option<Cell>,
    /// Kept in spawn order so movement is reproducible
    pub obstacles: Vec<Cell>,
    pub score: u32,
    pub high_score: u32,
    pub tick_interval_ms: u32,
    /// Ticks simulated while running
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh idle board with food placed
    pub fn new(config: GameConfig, high_score: u32, rng: &mut dyn RandomSource) -> Self {
        let mut state = Self {
            phase: GamePhase::Idle,
            end: None,
            snake: Snake::new(config.start),
            direction: Direction::Neutral,
            last_moved: Direction::Neutral,
            food: None,
            obstacles: Vec::new(),
            score: 0,
            high_score,
            tick_interval_ms: config.initial_interval_ms,
            time_ticks: 0,
            config,
        };
        state.place_initial_food(rng);
        state
    }

    /// Back to a fresh board; keeps config and high score
    pub fn reset(&mut self, rng: &mut dyn RandomSource) {
        *self = Self::new(self.config.clone(), self.high_score, rng);
    }

    fn place_initial_food(&mut self, rng: &mut dyn RandomSource) {
        match spawn::spawn(
            &self.food_exclusion(),
            self.config.grid_tiles,
            self.config.spawn_attempts,
            rng,
        ) {
            Ok(cell) => self.food = Some(cell),
            Err(e) => log::warn!("No room for initial food: {}", e),
        }
    }

    /// Cells food may not spawn on: snake and obstacles
    pub fn food_exclusion(&self) -> HashSet<Cell> {
        self.snake
            .segments()
            .chain(self.obstacles.iter().copied())
            .collect()
    }

    /// Cells a new obstacle may not spawn on: snake, food and obstacles
    pub fn obstacle_exclusion(&self) -> HashSet<Cell> {
        let mut occupied = self.food_exclusion();
        occupied.extend(self.food);
        occupied
    }

    /// End the run
    pub fn finish(&mut self, reason: EndReason) {
        self.phase = GamePhase::Over;
        self.end = Some(reason);
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid_tiles: self.config.grid_tiles,
            snake: self.snake.to_vec(),
            food: self.food,
            obstacles: self.obstacles.clone(),
            score: self.score,
            high_score: self.high_score,
            phase: self.phase,
            end: self.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_new_state() {
        let mut rng = Pcg32::seed_from_u64(1);
        let state = GameState::new(GameConfig::default(), 40, &mut rng);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), Cell::new(10, 10));
        assert_eq!(state.direction, Direction::Neutral);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 40);
        assert_eq!(state.tick_interval_ms, GameConfig::default().initial_interval_ms);
        let food = state.food.expect("food placed");
        assert!(!state.snake.contains(food));
    }

    #[test]
    fn test_reset_keeps_high_score() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut state = GameState::new(GameConfig::default(), 0, &mut rng);
        state.score = 90;
        state.high_score = 90;
        state.obstacles.push(Cell::new(0, 0));
        state.finish(EndReason::Collision(CollisionKind::Obstacle));

        state.reset(&mut rng);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.end, None);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 90);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_exclusion_sets() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut state = GameState::new(GameConfig::default(), 0, &mut rng);
        state.food = Some(Cell::new(1, 1));
        state.obstacles = vec![Cell::new(2, 2)];
        let food_ex = state.food_exclusion();
        assert!(food_ex.contains(&Cell::new(10, 10)));
        assert!(food_ex.contains(&Cell::new(2, 2)));
        assert!(!food_ex.contains(&Cell::new(1, 1)));
        assert!(state.obstacle_exclusion().contains(&Cell::new(1, 1)));
    }

    #[test]
    fn test_single_segment_tail_is_kept() {
        let mut snake = Snake::new(Cell::new(0, 0));
        assert_eq!(snake.pop_tail(), None);
        assert_eq!(snake.len(), 1);
        assert!(Snake::from_segments(Vec::new()).is_none());
    }
}
