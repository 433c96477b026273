//! Collision detection
//!
//! Runs after the new head has been prepended and before the tail is dropped,
//! so a head entering the cell the tail is about to leave still collides.
//! There are no walls; the board wraps.

use super::grid::Cell;
use super::state::{CollisionKind, Snake};

/// Check the head against the body and the obstacles
pub fn detect(snake: &Snake, obstacles: &[Cell]) -> Option<CollisionKind> {
    let head = snake.head();
    if snake.body_contains(head) {
        return Some(CollisionKind::SelfBite);
    }
    if obstacles.contains(&head) {
        return Some(CollisionKind::Obstacle);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(cells: &[(i32, i32)]) -> Snake {
        Snake::from_segments(cells.iter().map(|&(x, y)| Cell::new(x, y))).expect("non-empty")
    }

    #[test]
    fn test_no_collision() {
        let s = snake(&[(3, 3), (2, 3), (1, 3)]);
        assert_eq!(detect(&s, &[Cell::new(5, 5)]), None);
    }

    #[test]
    fn test_self_bite() {
        // Head moved onto segment index 3
        let s = snake(&[(2, 2), (2, 3), (3, 3), (2, 2), (1, 2)]);
        assert_eq!(detect(&s, &[]), Some(CollisionKind::SelfBite));
    }

    #[test]
    fn test_obstacle_hit() {
        let s = snake(&[(7, 1), (6, 1)]);
        assert_eq!(detect(&s, &[Cell::new(7, 1)]), Some(CollisionKind::Obstacle));
    }

    #[test]
    fn test_single_segment_never_bites() {
        assert_eq!(detect(&snake(&[(0, 0)]), &[]), None);
    }
}
