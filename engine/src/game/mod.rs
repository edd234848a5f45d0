mod engine;
pub mod rules;
mod session_rng;
mod state;
mod types;

pub use engine::{FoodEatenHandler, GameEngine, GameOverHandler, StateChangedHandler};
pub use session_rng::SessionRng;
pub use state::{GameSnapshot, GameState};
pub use types::{Direction, GamePhase, Point};
