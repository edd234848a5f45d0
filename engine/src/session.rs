use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::interval;

use crate::game::{Direction, GameEngine, GamePhase, GameSnapshot};

/// Async wrapper that schedules the engine. A frame task polls the
/// tick gate at a fixed cadence while the game is playing; pause,
/// reset and cleanup abort it before returning, so no stale tick can
/// fire afterwards. All mutation happens under one mutex, one frame
/// at a time.
pub struct GameSession {
    engine: Arc<Mutex<GameEngine>>,
    frame_interval: Duration,
    frame_task: Option<JoinHandle<()>>,
}

impl GameSession {
    pub fn new(engine: GameEngine) -> Self {
        let frame_interval = Duration::from_millis(engine.config().frame_interval_ms);
        Self {
            engine: Arc::new(Mutex::new(engine)),
            frame_interval,
            frame_task: None,
        }
    }

    /// Shared handle to the engine, e.g. for registering observers.
    pub fn engine(&self) -> Arc<Mutex<GameEngine>> {
        self.engine.clone()
    }

    pub async fn start(&mut self) {
        self.stop_frame_task();
        self.engine.lock().await.start(Instant::now());
        self.spawn_frame_task();
    }

    pub async fn pause(&mut self) {
        self.engine.lock().await.pause();
        self.stop_frame_task();
    }

    pub async fn resume(&mut self) {
        let playing = {
            let mut engine = self.engine.lock().await;
            engine.resume(Instant::now());
            engine.phase() == GamePhase::Playing
        };
        // resume() is a no-op outside Paused; only spawn when it took.
        if playing && self.frame_task.is_none() {
            self.spawn_frame_task();
        }
    }

    pub async fn toggle_pause(&mut self) {
        let phase = self.engine.lock().await.phase();
        match phase {
            GamePhase::Playing => self.pause().await,
            GamePhase::Paused => self.resume().await,
            _ => {}
        }
    }

    pub async fn reset(&mut self) {
        self.stop_frame_task();
        self.engine.lock().await.reset();
    }

    pub async fn change_direction(&self, direction: Direction) {
        self.engine.lock().await.change_direction(direction);
    }

    pub async fn state(&self) -> GameSnapshot {
        self.engine.lock().await.snapshot()
    }

    pub async fn cleanup(&mut self) {
        self.stop_frame_task();
        self.engine.lock().await.cleanup();
    }

    fn spawn_frame_task(&mut self) {
        let engine = self.engine.clone();
        let frame_interval = self.frame_interval;
        self.frame_task = Some(tokio::spawn(async move {
            let mut frame_timer = interval(frame_interval);
            loop {
                frame_timer.tick().await;
                let mut engine = engine.lock().await;
                engine.advance(Instant::now());
                if engine.phase() != GamePhase::Playing {
                    break;
                }
            }
        }));
    }

    fn stop_frame_task(&mut self) {
        if let Some(task) = self.frame_task.take() {
            task.abort();
        }
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.stop_frame_task();
    }
}
