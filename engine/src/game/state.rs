use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use crate::config::GameConfig;

use super::rules;
use super::session_rng::SessionRng;
use super::types::{Direction, GamePhase, Point};

/// Live engine-owned state. The snake is a deque with the head at the
/// front; `occupied` is kept in lockstep with it for O(1) collision
/// checks.
#[derive(Clone, Debug)]
pub struct GameState {
    pub snake: VecDeque<Point>,
    pub occupied: HashSet<Point>,
    pub food: Point,
    pub direction: Direction,
    pub pending_direction: Direction,
    pub phase: GamePhase,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub speed: Duration,
    pub food_count: u32,
    pub paused: bool,
}

impl GameState {
    /// Fresh round: three segments centered on the grid, heading
    /// right, food randomized off the snake, phase Menu.
    pub fn initial(config: &GameConfig, rng: &mut SessionRng) -> Self {
        let center = Point::new(config.grid_size / 2, config.grid_size / 2);
        let mut snake = VecDeque::new();
        let mut occupied = HashSet::new();
        for i in 0..3 {
            let segment = Point::new(center.x - i, center.y);
            snake.push_back(segment);
            occupied.insert(segment);
        }

        let food = rules::random_food_position(rng, &occupied, config.grid_size)
            .expect("a fresh grid always has free cells");

        Self {
            snake,
            occupied,
            food,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            phase: GamePhase::Menu,
            score: 0,
            high_score: 0,
            level: 1,
            speed: Duration::from_millis(config.initial_speed_ms),
            food_count: 0,
            paused: false,
        }
    }

    pub fn head(&self) -> Point {
        *self.snake.front().expect("snake body is never empty")
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            snake: self.snake.iter().copied().collect(),
            food: self.food,
            direction: self.direction,
            pending_direction: self.pending_direction,
            phase: self.phase,
            score: self.score,
            high_score: self.high_score,
            level: self.level,
            speed: self.speed,
            food_count: self.food_count,
            paused: self.paused,
        }
    }
}

/// Immutable copy of the state handed to observers. Head first in
/// `snake`.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSnapshot {
    pub snake: Vec<Point>,
    pub food: Point,
    pub direction: Direction,
    pub pending_direction: Direction,
    pub phase: GamePhase,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub speed: Duration,
    pub food_count: u32,
    pub paused: bool,
}
