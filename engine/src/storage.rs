use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Injected persistence port for the single best-score scalar. An
/// absent value reads as 0; callers treat failures as non-fatal.
pub trait HighScoreStore: Send {
    fn load(&self) -> Result<u32, String>;
    fn save(&self, score: u32) -> Result<(), String>;
}

/// Stores the high score as a bare integer in a text file.
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> Result<u32, String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => content
                .trim()
                .parse::<u32>()
                .map_err(|e| format!("Invalid high score file: {}", e)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(format!("Failed to read high score: {}", e)),
        }
    }

    fn save(&self, score: u32) -> Result<(), String> {
        std::fs::write(&self.path, score.to_string())
            .map_err(|e| format!("Failed to write high score: {}", e))
    }
}

/// In-memory store with a shared handle, so tests and benches can
/// observe what the engine persisted.
#[derive(Clone, Default)]
pub struct MemoryHighScoreStore {
    value: Arc<Mutex<u32>>,
}

impl MemoryHighScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u32 {
        *self.value.lock().expect("high score lock is never poisoned")
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> Result<u32, String> {
        Ok(self.value())
    }

    fn save(&self, score: u32) -> Result<(), String> {
        *self.value.lock().expect("high score lock is never poisoned") = score;
        Ok(())
    }
}
