//! Snake motion on the wrap-around board

use super::grid::{Cell, Direction};
use super::state::Snake;

/// Prepend the next head; returns it, or `None` for a `Neutral` heading.
///
/// The tail is left in place: the caller drops it unless growth is pending.
pub fn advance(snake: &mut Snake, direction: Direction, tiles: i32) -> Option<Cell> {
    if direction.is_neutral() {
        return None;
    }
    let head = snake.head().stepped(direction, tiles);
    snake.push_head(head);
    Some(head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_right() {
        let mut snake = Snake::new(Cell::new(10, 10));
        assert_eq!(advance(&mut snake, Direction::Right, 20), Some(Cell::new(11, 10)));
        assert_eq!(snake.to_vec(), vec![Cell::new(11, 10), Cell::new(10, 10)]);
    }

    #[test]
    fn test_advance_wraps_right_edge() {
        let mut snake = Snake::new(Cell::new(19, 4));
        assert_eq!(advance(&mut snake, Direction::Right, 20), Some(Cell::new(0, 4)));
    }

    #[test]
    fn test_neutral_is_noop() {
        let mut snake = Snake::new(Cell::new(3, 3));
        assert_eq!(advance(&mut snake, Direction::Neutral, 20), None);
        assert_eq!(snake.to_vec(), vec![Cell::new(3, 3)]);
    }
}
