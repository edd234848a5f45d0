//! Pure geometry and progression rules. Everything here is stateless;
//! the engine calls in and holds no duplicate of this logic.

use std::collections::HashSet;
use std::time::Duration;

use crate::config::GameConfig;

use super::session_rng::SessionRng;
use super::types::Point;

const MAX_PLACEMENT_ATTEMPTS: usize = 100;

pub fn is_out_of_bounds(position: Point, grid_size: i32) -> bool {
    position.x < 0 || position.x >= grid_size || position.y < 0 || position.y >= grid_size
}

/// Exact-equality membership test against the pre-move body. The tail
/// counts: stepping onto it is lethal even though it would move away.
pub fn self_collision(head: Point, occupied: &HashSet<Point>) -> bool {
    occupied.contains(&head)
}

/// `max(initial - level * increment, max_speed)`, saturating so large
/// levels stay floored at the max speed.
pub fn speed_for_level(config: &GameConfig, level: u32) -> Duration {
    let ms = config
        .initial_speed_ms
        .saturating_sub(u64::from(level) * config.speed_increment_ms)
        .max(config.max_speed_ms);
    Duration::from_millis(ms)
}

/// Score is recomputed from scratch on every food eaten, so the level
/// multiplier rescales the whole total, not just the last food.
pub fn score_for_food(config: &GameConfig, food_count: u32, level: u32) -> u32 {
    food_count * config.score_per_food * (level / 2).max(1)
}

/// Level is derived from score, one level per five foods' worth of
/// base score.
pub fn level_for_score(config: &GameConfig, score: u32) -> u32 {
    score / (config.score_per_food * 5) + 1
}

/// Uniformly samples a free cell. Rejection sampling is bounded;
/// when the grid is crowded enough to exhaust the attempts the free
/// cells are enumerated and sampled directly. `None` only when the
/// snake fills the whole grid.
pub fn random_food_position(
    rng: &mut SessionRng,
    occupied: &HashSet<Point>,
    grid_size: i32,
) -> Option<Point> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let position = Point::new(rng.random_range(0..grid_size), rng.random_range(0..grid_size));
        if !occupied.contains(&position) {
            return Some(position);
        }
    }

    let free_cells: Vec<Point> = (0..grid_size)
        .flat_map(|y| (0..grid_size).map(move |x| Point::new(x, y)))
        .filter(|p| !occupied.contains(p))
        .collect();

    if free_cells.is_empty() {
        None
    } else {
        Some(free_cells[rng.random_range(0..free_cells.len())])
    }
}
