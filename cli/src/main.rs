mod autopilot;

use std::time::Duration;

use clap::Parser;
use snake_engine::config::GameConfig;
use snake_engine::game::{GameEngine, GamePhase, SessionRng};
use snake_engine::session::GameSession;
use snake_engine::storage::FileHighScoreStore;
use snake_engine::{log, logger};

const CONFIG_FILE_NAME: &str = "snake_config.yaml";
const HIGH_SCORE_FILE_NAME: &str = "snake_high_score";

#[derive(Parser)]
#[command(name = "snake_cli")]
struct Args {
    /// Path to the YAML game config; defaults apply when the file is
    /// missing
    #[arg(long)]
    config: Option<String>,

    /// Seed for food placement; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Stop the demo after this many frames even if the snake is
    /// still alive
    #[arg(long, default_value_t = 20000)]
    max_frames: u64,

    #[arg(long)]
    use_log_prefix: bool,
}

fn exe_relative_path(file_name: &str) -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(file_name).to_string_lossy().into_owned();
    }
    file_name.to_string()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Snake".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_path = args
        .config
        .unwrap_or_else(|| exe_relative_path(CONFIG_FILE_NAME));
    let config = GameConfig::load_or_default(&config_path)?;

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    let storage = FileHighScoreStore::new(exe_relative_path(HIGH_SCORE_FILE_NAME));

    let mut engine = GameEngine::new(config, Box::new(storage), rng);
    engine.set_food_eaten_handler(Box::new(|food| {
        log!("Food respawned at ({}, {})", food.x, food.y);
    }));
    engine.set_game_over_handler(Box::new(|score| {
        log!("Final score: {}", score);
    }));

    let mut session = GameSession::new(engine);
    session.start().await;

    let frame = Duration::from_millis(config.frame_interval_ms);
    let mut frames = 0u64;
    loop {
        tokio::time::sleep(frame).await;

        let snapshot = session.state().await;
        if snapshot.phase == GamePhase::GameOver {
            break;
        }
        if let Some(direction) = autopilot::next_direction(&snapshot, config.grid_size) {
            session.change_direction(direction).await;
        }

        frames += 1;
        if frames >= args.max_frames {
            log!("Frame budget exhausted, stopping");
            break;
        }
    }

    let snapshot = session.state().await;
    log!(
        "Run finished: score {} (best {}), level {}, snake length {}",
        snapshot.score,
        snapshot.high_score,
        snapshot.level,
        snapshot.snake.len()
    );
    session.cleanup().await;

    Ok(())
}
