use serde::{Deserialize, Serialize};

/// Game tuning values. The defaults reproduce the classic 20x20
/// arcade setup: 150ms starting tick, 10ms faster per level, floored
/// at 50ms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_size: i32,
    pub initial_speed_ms: u64,
    pub max_speed_ms: u64,
    pub speed_increment_ms: u64,
    pub score_per_food: u32,
    /// Cadence of the scheduler that polls the tick gate, not the
    /// tick interval itself.
    pub frame_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_speed_ms: 150,
            max_speed_ms: 50,
            speed_increment_ms: 10,
            score_per_food: 10,
            frame_interval_ms: 16,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_size < 5 || self.grid_size > 100 {
            return Err("Grid size must be between 5 and 100".to_string());
        }
        if self.max_speed_ms == 0 {
            return Err("Max speed must be at least 1ms".to_string());
        }
        if self.initial_speed_ms < self.max_speed_ms {
            return Err("Initial speed must not be faster than max speed".to_string());
        }
        if self.score_per_food == 0 {
            return Err("Score per food must be at least 1".to_string());
        }
        if self.frame_interval_ms == 0 || self.frame_interval_ms > self.max_speed_ms {
            return Err("Frame interval must be between 1ms and the max speed".to_string());
        }
        Ok(())
    }

    /// Reads the config from a YAML file. A missing file is not an
    /// error: defaults are returned, matching how the rest of the
    /// workspace treats absent config.
    pub fn load_or_default(path: &str) -> Result<Self, String> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let config: GameConfig = serde_yaml_ng::from_str(&content)
                    .map_err(|e| format!("Failed to parse config: {}", e))?;
                config
                    .validate()
                    .map_err(|e| format!("Config validation error: {}", e))?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(format!("Failed to read config file: {}", e)),
        }
    }

    pub fn save(&self, path: &str) -> Result<(), String> {
        let content = serde_yaml_ng::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_temp_file_path() -> String {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_snake_config_{}.yaml", random_number));
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_config_round_trips_through_yaml() {
        let config = GameConfig::default();
        let serialized = serde_yaml_ng::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_yaml_ng::from_str(&serialized).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_file_returns_default() {
        let config = GameConfig::load_or_default("this_file_does_not_exist.yaml").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let config = GameConfig {
            grid_size: 30,
            initial_speed_ms: 200,
            ..GameConfig::default()
        };
        let path = get_temp_file_path();
        config.save(&path).unwrap();
        let loaded = GameConfig::load_or_default(&path).unwrap();
        assert_eq!(config, loaded);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let path = get_temp_file_path();
        std::fs::write(&path, "grid_size: 25\n").unwrap();
        let loaded = GameConfig::load_or_default(&path).unwrap();
        assert_eq!(loaded.grid_size, 25);
        assert_eq!(loaded.initial_speed_ms, GameConfig::default().initial_speed_ms);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig {
            grid_size: 3,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            initial_speed_ms: 40,
            max_speed_ms: 50,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let path = get_temp_file_path();
        std::fs::write(&path, "grid_size: 1000\n").unwrap();
        assert!(GameConfig::load_or_default(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
