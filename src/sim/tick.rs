//! Fixed-rate simulation tick
//!
//! One call advances a running game by one tile: motion, collision, food,
//! difficulty, then obstacle drift. Lifecycle commands and steering are
//! applied between ticks.

use super::collision;
use super::difficulty;
use super::grid::{Direction, RandomSource};
use super::motion;
use super::obstacles::{self, DriftRules};
use super::spawn::{self, SpawnError};
use super::state::{EndReason, GameEvent, GamePhase, GameState};

/// Queue a heading for the next tick.
///
/// A heading is rejected when it reverses either the queued heading or the
/// last executed move, so two quick presses within one tick cannot turn the
/// snake back into its neck. Returns whether the heading was accepted.
pub fn steer(state: &mut GameState, direction: Direction) -> bool {
    if direction.is_neutral() {
        return false;
    }
    if state.direction.is_opposite(direction) || state.last_moved.is_opposite(direction) {
        log::debug!(
            "Ignoring reversal {:?} -> {:?} (last moved {:?})",
            state.direction,
            direction,
            state.last_moved
        );
        return false;
    }
    state.direction = direction;
    true
}

/// Idle/Over -> Running on a fresh board. Returns whether the game started.
pub fn start(state: &mut GameState, rng: &mut dyn RandomSource) -> bool {
    match state.phase {
        GamePhase::Idle | GamePhase::Over => {
            restart(state, rng);
            true
        }
        GamePhase::Running | GamePhase::Paused => false,
    }
}

/// Any phase -> Running on a fresh board
pub fn restart(state: &mut GameState, rng: &mut dyn RandomSource) {
    state.reset(rng);
    state.phase = GamePhase::Running;
    log::info!("Game started (high score {})", state.high_score);
}

/// Running <-> Paused; other phases are left alone
pub fn toggle_pause(state: &mut GameState) -> GamePhase {
    state.phase = match state.phase {
        GamePhase::Running => GamePhase::Paused,
        GamePhase::Paused => GamePhase::Running,
        other => other,
    };
    log::debug!("Phase now {:?}", state.phase);
    state.phase
}

/// Advance the game by one tick and report what happened
pub fn tick(state: &mut GameState, rng: &mut dyn RandomSource) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Running {
        return events;
    }
    state.time_ticks += 1;

    let tiles = state.config.grid_tiles;
    let Some(head) = motion::advance(&mut state.snake, state.direction, tiles) else {
        return events;
    };
    state.last_moved = state.direction;

    if let Some(kind) = collision::detect(&state.snake, &state.obstacles) {
        end_run(state, EndReason::Collision(kind), &mut events);
        return events;
    }

    if state.food == Some(head) {
        if let Err(SpawnError::GridFull) = eat(state, rng, &mut events) {
            state.food = state.food.filter(|&f| f != head);
            end_run(state, EndReason::BoardFull, &mut events);
            return events;
        }
    } else {
        state.snake.pop_tail();
    }

    if difficulty::obstacles_wander(state.score, &state.config) {
        let rules = DriftRules {
            chance: state.config.obstacle_move_chance,
            attempts: state.config.obstacle_move_attempts,
        };
        let moved = obstacles::move_all(
            &mut state.obstacles,
            &state.snake,
            state.food,
            tiles,
            rules,
            rng,
        );
        if moved > 0 {
            events.push(GameEvent::ObstaclesMoved(moved));
        }
    }

    events
}

/// Growth, score, speed, new food and the occasional new obstacle
fn eat(
    state: &mut GameState,
    rng: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) -> Result<(), SpawnError> {
    let head = state.snake.head();
    let outcome = difficulty::on_food_eaten(state.score, state.tick_interval_ms, &state.config);
    state.score = outcome.score;
    events.push(GameEvent::FoodEaten {
        at: head,
        score: state.score,
    });

    if outcome.tick_interval_ms != state.tick_interval_ms {
        state.tick_interval_ms = outcome.tick_interval_ms;
        log::debug!("Tick interval now {}ms", state.tick_interval_ms);
        events.push(GameEvent::SpeedChanged {
            interval_ms: state.tick_interval_ms,
        });
    }

    if state.score > state.high_score {
        state.high_score = state.score;
        events.push(GameEvent::NewHighScore(state.score));
    }

    let food = spawn::spawn(
        &state.food_exclusion(),
        state.config.grid_tiles,
        state.config.spawn_attempts,
        rng,
    )?;
    state.food = Some(food);

    for _ in 0..outcome.obstacle_delta {
        let cell = spawn::spawn(
            &state.obstacle_exclusion(),
            state.config.grid_tiles,
            state.config.spawn_attempts,
            rng,
        )?;
        state.obstacles.push(cell);
        log::info!(
            "Obstacle #{} at ({}, {}) for score {}",
            state.obstacles.len(),
            cell.x,
            cell.y,
            state.score
        );
        events.push(GameEvent::ObstacleSpawned(cell));
    }

    Ok(())
}

fn end_run(state: &mut GameState, reason: EndReason, events: &mut Vec<GameEvent>) {
    state.finish(reason);
    log::info!(
        "Game over after {} ticks: {:?}, score {}",
        state.time_ticks,
        reason,
        state.score
    );
    events.push(GameEvent::GameOver {
        score: state.score,
        reason,
    });
}
