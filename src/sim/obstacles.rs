//! Wandering obstacles
//!
//! Once the score passes the threshold every obstacle may drift one tile per
//! tick. Obstacles are visited in spawn order; a moved obstacle blocks its new
//! cell for the ones visited after it.

use std::collections::HashSet;

use super::grid::{Cell, RandomSource};
use super::state::Snake;

/// Probabilistic drift parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftRules {
    /// Per-obstacle chance of trying to move this tick
    pub chance: f64,
    /// Direction draws before giving up
    pub attempts: u32,
}

/// Drift obstacles in place; returns how many changed cell.
///
/// A candidate must avoid the snake, the food and every other obstacle. An
/// obstacle that finds no candidate within `rules.attempts` draws stays put.
pub fn move_all(
    obstacles: &mut [Cell],
    snake: &Snake,
    food: Option<Cell>,
    tiles: i32,
    rules: DriftRules,
    rng: &mut dyn RandomSource,
) -> usize {
    let mut blocked: HashSet<Cell> = snake
        .segments()
        .chain(food)
        .chain(obstacles.iter().copied())
        .collect();
    let mut moved = 0;

    for obstacle in obstacles.iter_mut() {
        if !rng.chance(rules.chance) {
            continue;
        }
        let from = *obstacle;
        blocked.remove(&from);

        let target = (0..rules.attempts)
            .map(|_| from.stepped(rng.cardinal(), tiles))
            .find(|candidate| !blocked.contains(candidate));

        match target {
            Some(to) => {
                log::trace!("Obstacle ({}, {}) -> ({}, {})", from.x, from.y, to.x, to.y);
                *obstacle = to;
                moved += 1;
            }
            None => log::trace!("Obstacle ({}, {}) boxed in", from.x, from.y),
        }
        blocked.insert(*obstacle);
    }

    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::tests::ScriptedSource;

    const ALWAYS: DriftRules = DriftRules {
        chance: 1.0,
        attempts: 10,
    };

    #[test]
    fn test_skips_when_draw_fails() {
        let mut obstacles = vec![Cell::new(5, 5)];
        let snake = Snake::new(Cell::new(0, 0));
        let mut rng = ScriptedSource::new(&[3], &[false]);
        assert_eq!(move_all(&mut obstacles, &snake, None, 20, ALWAYS, &mut rng), 0);
        assert_eq!(obstacles, vec![Cell::new(5, 5)]);
    }

    #[test]
    fn test_moves_in_drawn_direction() {
        let mut obstacles = vec![Cell::new(0, 5)];
        let snake = Snake::new(Cell::new(10, 10));
        // index 2 = Left, wraps to the far column
        let mut rng = ScriptedSource::new(&[2], &[true]);
        assert_eq!(move_all(&mut obstacles, &snake, None, 20, ALWAYS, &mut rng), 1);
        assert_eq!(obstacles, vec![Cell::new(19, 5)]);
    }

    #[test]
    fn test_retries_blocked_directions() {
        let mut obstacles = vec![Cell::new(5, 5)];
        let snake = Snake::new(Cell::new(5, 4));
        // Up is the snake, Down is food, then Right is free
        let mut rng = ScriptedSource::new(&[0, 1, 3], &[true]);
        let moved = move_all(
            &mut obstacles,
            &snake,
            Some(Cell::new(5, 6)),
            20,
            ALWAYS,
            &mut rng,
        );
        assert_eq!(moved, 1);
        assert_eq!(obstacles, vec![Cell::new(6, 5)]);
    }

    #[test]
    fn test_boxed_in_obstacle_stays() {
        let center = Cell::new(5, 5);
        let snake = Snake::from_segments([
            Cell::new(5, 4),
            Cell::new(4, 4),
            Cell::new(4, 5),
            Cell::new(4, 6),
            Cell::new(5, 6),
        ])
        .expect("non-empty");
        let mut obstacles = vec![center, Cell::new(6, 5)];
        // First obstacle tries all ten draws and fails; second never rolls
        let draws = [0, 1, 2, 3, 0, 1, 2, 3, 0, 1];
        let mut rng = ScriptedSource::new(&draws, &[true, false]);
        assert_eq!(move_all(&mut obstacles, &snake, None, 20, ALWAYS, &mut rng), 0);
        assert_eq!(obstacles, vec![center, Cell::new(6, 5)]);
        assert!(rng.values.is_empty());
    }

    #[test]
    fn test_later_obstacle_sees_earlier_move() {
        let snake = Snake::new(Cell::new(15, 15));
        let mut obstacles = vec![Cell::new(1, 1), Cell::new(3, 1)];
        // First moves Right into (2,1); second tries Left into (2,1), then Up
        let mut rng = ScriptedSource::new(&[3, 2, 0], &[true, true]);
        assert_eq!(move_all(&mut obstacles, &snake, None, 20, ALWAYS, &mut rng), 2);
        assert_eq!(obstacles, vec![Cell::new(2, 1), Cell::new(3, 0)]);
    }
}
