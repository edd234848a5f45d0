pub mod config;
pub mod game;
pub mod input;
pub mod logger;
pub mod session;
pub mod storage;

pub use config::GameConfig;
pub use game::{Direction, GameEngine, GamePhase, GameSnapshot, Point, SessionRng};
pub use session::GameSession;
pub use storage::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore};
