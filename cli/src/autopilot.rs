use std::collections::HashSet;

use snake_engine::game::rules;
use snake_engine::game::{Direction, GameSnapshot, Point};

/// Greedy autopilot: of the non-reversing moves that stay on the grid
/// and off the body, pick the one closest to the food. Returns `None`
/// when boxed in, at which point the snake keeps its heading and the
/// round ends on its own.
pub fn next_direction(snapshot: &GameSnapshot, grid_size: i32) -> Option<Direction> {
    let head = *snapshot.snake.first()?;
    let occupied: HashSet<Point> = snapshot.snake.iter().copied().collect();
    let current = snapshot.direction;

    let mut best: Option<(i32, Direction)> = None;
    for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
        if direction.is_opposite(&current) {
            continue;
        }
        let next = head.offset(direction);
        if rules::is_out_of_bounds(next, grid_size) || occupied.contains(&next) {
            continue;
        }
        let distance = manhattan_distance(next, snapshot.food);
        if best.is_none_or(|(d, _)| distance < d) {
            best = Some((distance, direction));
        }
    }

    best.map(|(_, direction)| direction)
}

fn manhattan_distance(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_engine::game::GamePhase;
    use std::time::Duration;

    fn snapshot_with(snake: Vec<Point>, food: Point, direction: Direction) -> GameSnapshot {
        GameSnapshot {
            snake,
            food,
            direction,
            pending_direction: direction,
            phase: GamePhase::Playing,
            score: 0,
            high_score: 0,
            level: 1,
            speed: Duration::from_millis(150),
            food_count: 0,
            paused: false,
        }
    }

    #[test]
    fn test_heads_toward_food() {
        let snapshot = snapshot_with(
            vec![Point::new(10, 10), Point::new(9, 10), Point::new(8, 10)],
            Point::new(10, 2),
            Direction::Right,
        );
        assert_eq!(next_direction(&snapshot, 20), Some(Direction::Up));
    }

    #[test]
    fn test_never_reverses() {
        let snapshot = snapshot_with(
            vec![Point::new(10, 10), Point::new(9, 10), Point::new(8, 10)],
            Point::new(2, 10),
            Direction::Right,
        );
        // Food is straight behind; Left is forbidden, so the pilot
        // detours vertically or keeps going.
        assert_ne!(next_direction(&snapshot, 20), Some(Direction::Left));
    }

    #[test]
    fn test_avoids_walls() {
        let snapshot = snapshot_with(
            vec![Point::new(19, 10), Point::new(18, 10), Point::new(17, 10)],
            Point::new(19, 0),
            Direction::Right,
        );
        assert_eq!(next_direction(&snapshot, 20), Some(Direction::Up));
    }

    #[test]
    fn test_avoids_own_body() {
        let snapshot = snapshot_with(
            vec![
                Point::new(10, 10),
                Point::new(10, 9),
                Point::new(11, 9),
                Point::new(11, 10),
                Point::new(11, 11),
            ],
            Point::new(15, 10),
            Direction::Down,
        );
        // Right is the body and Up reverses; Down and Left tie on
        // distance and Down is tried first.
        assert_eq!(next_direction(&snapshot, 20), Some(Direction::Down));
    }

    #[test]
    fn test_boxed_in_returns_none() {
        let snapshot = snapshot_with(
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(1, 1),
                Point::new(0, 1),
                Point::new(0, 2),
            ],
            Point::new(10, 10),
            Direction::Left,
        );
        assert_eq!(next_direction(&snapshot, 20), None);
    }
}
