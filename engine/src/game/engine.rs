use std::time::Instant;

use crate::config::GameConfig;
use crate::storage::HighScoreStore;
use crate::{log, warn};

use super::rules;
use super::session_rng::SessionRng;
use super::state::{GameSnapshot, GameState};
use super::types::{Direction, GamePhase, Point};

pub type StateChangedHandler = Box<dyn FnMut(&GameSnapshot) + Send>;
pub type FoodEatenHandler = Box<dyn FnMut(Point) + Send>;
pub type GameOverHandler = Box<dyn FnMut(u32) + Send>;

/// The authoritative game state machine. Commands that are invalid in
/// the current phase are silently ignored; the engine never errors
/// during normal operation.
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    rng: SessionRng,
    storage: Box<dyn HighScoreStore>,
    last_update: Instant,
    on_state_changed: Option<StateChangedHandler>,
    on_food_eaten: Option<FoodEatenHandler>,
    on_game_over: Option<GameOverHandler>,
}

impl GameEngine {
    pub fn new(config: GameConfig, storage: Box<dyn HighScoreStore>, mut rng: SessionRng) -> Self {
        let state = GameState::initial(&config, &mut rng);
        Self {
            config,
            state,
            rng,
            storage,
            last_update: Instant::now(),
            on_state_changed: None,
            on_food_eaten: None,
            on_game_over: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    pub fn set_state_changed_handler(&mut self, handler: StateChangedHandler) {
        self.on_state_changed = Some(handler);
    }

    pub fn set_food_eaten_handler(&mut self, handler: FoodEatenHandler) {
        self.on_food_eaten = Some(handler);
    }

    pub fn set_game_over_handler(&mut self, handler: GameOverHandler) {
        self.on_game_over = Some(handler);
    }

    /// Starts a fresh round. Callable from any phase, so it doubles
    /// as an immediate restart.
    pub fn start(&mut self, now: Instant) {
        self.state = GameState::initial(&self.config, &mut self.rng);
        self.state.high_score = self.load_high_score();
        self.state.phase = GamePhase::Playing;
        self.last_update = now;
        log!("Round started (seed {})", self.rng.seed());
        self.notify_state_changed();
    }

    pub fn pause(&mut self) {
        if self.state.phase != GamePhase::Playing {
            return;
        }
        self.state.paused = true;
        self.state.phase = GamePhase::Paused;
        self.notify_state_changed();
    }

    pub fn resume(&mut self, now: Instant) {
        if self.state.phase != GamePhase::Paused {
            return;
        }
        self.state.paused = false;
        self.state.phase = GamePhase::Playing;
        // The paused duration must not count against the next tick.
        self.last_update = now;
        self.notify_state_changed();
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        match self.state.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(now),
            _ => {}
        }
    }

    /// Rebuilds the initial state and lands back in Menu.
    pub fn reset(&mut self) {
        self.state = GameState::initial(&self.config, &mut self.rng);
        self.state.high_score = self.load_high_score();
        self.notify_state_changed();
    }

    /// Buffers a turn for the next tick. Reversals are rejected
    /// against the current direction, not the pending one, so two
    /// quick inputs between ticks can never fold the snake onto
    /// itself. Between two ticks the last accepted request wins.
    pub fn change_direction(&mut self, direction: Direction) {
        if self.state.phase != GamePhase::Playing {
            return;
        }
        if direction.is_opposite(&self.state.direction) {
            return;
        }
        self.state.pending_direction = direction;
    }

    /// Scheduler entry point: runs one tick when the elapsed time
    /// since the last tick reaches the current speed. Safe to call at
    /// any cadence and in any phase.
    pub fn advance(&mut self, now: Instant) {
        if self.state.phase != GamePhase::Playing {
            return;
        }
        if now.duration_since(self.last_update) < self.state.speed {
            return;
        }
        self.tick();
        self.last_update = now;
    }

    /// Detaches all observers. The engine stays queryable but inert.
    pub fn cleanup(&mut self) {
        self.on_state_changed = None;
        self.on_food_eaten = None;
        self.on_game_over = None;
    }

    fn tick(&mut self) {
        self.state.direction = self.state.pending_direction;
        let next_head = self.state.head().offset(self.state.direction);

        if rules::is_out_of_bounds(next_head, self.config.grid_size)
            || rules::self_collision(next_head, &self.state.occupied)
        {
            self.end_round();
            return;
        }

        self.state.snake.push_front(next_head);
        self.state.occupied.insert(next_head);

        if next_head == self.state.food {
            self.eat_food();
            if self.state.phase == GamePhase::GameOver {
                return;
            }
        } else {
            let tail = self
                .state
                .snake
                .pop_back()
                .expect("snake body is never empty");
            self.state.occupied.remove(&tail);
        }

        self.notify_state_changed();
    }

    fn eat_food(&mut self) {
        self.state.food_count += 1;
        // Score is recomputed from the food count and the level that
        // was in effect when the food was eaten; the level (and with
        // it the speed) only ratchets upward afterwards.
        self.state.score =
            rules::score_for_food(&self.config, self.state.food_count, self.state.level);

        let new_level = rules::level_for_score(&self.config, self.state.score);
        if new_level > self.state.level {
            self.state.level = new_level;
            self.state.speed = rules::speed_for_level(&self.config, new_level);
            log!("Level up: {} ({}ms per tick)", new_level, self.state.speed.as_millis());
        }

        match rules::random_food_position(
            &mut self.rng,
            &self.state.occupied,
            self.config.grid_size,
        ) {
            Some(food) => {
                self.state.food = food;
                if let Some(handler) = self.on_food_eaten.as_mut() {
                    handler(food);
                }
            }
            // The snake fills the whole grid; the round is over.
            None => self.end_round(),
        }
    }

    fn end_round(&mut self) {
        self.state.phase = GamePhase::GameOver;
        if self.state.score > self.state.high_score {
            self.state.high_score = self.state.score;
            self.save_high_score(self.state.score);
        }
        log!("Game over with score {}", self.state.score);
        let final_score = self.state.score;
        if let Some(handler) = self.on_game_over.as_mut() {
            handler(final_score);
        }
        self.notify_state_changed();
    }

    fn load_high_score(&self) -> u32 {
        match self.storage.load() {
            Ok(value) => value,
            Err(e) => {
                warn!("Could not load high score: {}", e);
                0
            }
        }
    }

    fn save_high_score(&self, score: u32) {
        if let Err(e) = self.storage.save(score) {
            warn!("Could not save high score: {}", e);
        }
    }

    fn notify_state_changed(&mut self) {
        let snapshot = self.state.snapshot();
        if let Some(handler) = self.on_state_changed.as_mut() {
            handler(&snapshot);
        }
    }

    #[cfg(test)]
    fn set_food(&mut self, food: Point) {
        self.state.food = food;
    }

    #[cfg(test)]
    fn set_level(&mut self, level: u32) {
        self.state.level = level;
    }

    #[cfg(test)]
    fn set_snake(&mut self, body: Vec<Point>) {
        self.state.occupied = body.iter().copied().collect();
        self.state.snake = body.into();
    }
}
