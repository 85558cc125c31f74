use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fastest starting tick rate, one tick per millisecond
pub const MAX_INITIAL_SPEED: u32 = 1000;

/// Configuration for the game
///
/// Both observed rule sets of the arcade game are expressible as values of
/// this struct; see [`GameConfig::classic`] and [`GameConfig::leveled`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of one cell, in position units
    pub cell_size: i32,
    /// Width of the game grid, in cells
    pub grid_width: i32,
    /// Height of the game grid, in cells
    pub grid_height: i32,

    /// Regular foods eaten before a big food spawns
    pub big_food_threshold: u32,
    /// Lifetime of an uneaten big food, in milliseconds
    pub big_food_timeout_ms: u64,

    /// Score multiple at which the level goes up
    pub level_up_score_step: u32,
    /// Ticks per second at level 1
    pub initial_speed: u32,
    /// Ticks per second added per level
    pub speed_increment: u32,

    // Scoring
    /// Points for regular food
    pub food_score: u32,
    /// Points for big food
    pub big_food_score: u32,
    /// Growth target added when big food is eaten
    pub big_food_growth: usize,

    /// Show a start screen before the first game
    pub start_screen: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl GameConfig {
    /// 480x480 board of 20-unit cells, speed 5 going up by 1 per level
    pub fn classic() -> Self {
        Self {
            cell_size: 20,
            grid_width: 24,
            grid_height: 24,
            big_food_threshold: 10,
            big_food_timeout_ms: 5000,
            level_up_score_step: 5,
            initial_speed: 5,
            speed_increment: 1,
            food_score: 1,
            big_food_score: 5,
            big_food_growth: 0,
            start_screen: true,
        }
    }

    /// Same board, starting at speed 10 and going up by 5 per level
    pub fn leveled() -> Self {
        Self {
            initial_speed: 10,
            speed_increment: 5,
            ..Self::classic()
        }
    }

    /// Create a new configuration with custom grid size (in cells)
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Board width in position units
    pub fn pixel_width(&self) -> i32 {
        self.grid_width * self.cell_size
    }

    /// Board height in position units
    pub fn pixel_height(&self) -> i32 {
        self.grid_height * self.cell_size
    }

    /// Number of cells on the board
    pub fn cell_count(&self) -> usize {
        (self.grid_width.max(0) as usize) * (self.grid_height.max(0) as usize)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.cell_size > 0, "cell_size must be positive");
        ensure!(
            self.grid_width > 0 && self.grid_height > 0,
            "grid must be at least 1x1, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        // Snake head, food and big food must all fit at once
        ensure!(
            self.cell_count() >= 3,
            "grid of {} cells is too small to play on",
            self.cell_count()
        );
        ensure!(
            self.big_food_threshold > 0,
            "big_food_threshold must be positive"
        );
        ensure!(
            self.level_up_score_step > 0,
            "level_up_score_step must be positive"
        );
        ensure!(
            (1..=MAX_INITIAL_SPEED).contains(&self.initial_speed),
            "initial_speed must be between 1 and {}, got {}",
            MAX_INITIAL_SPEED,
            self.initial_speed
        );
        Ok(())
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {:?}", path))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.cell_size, 20);
        assert_eq!(config.grid_width, 24);
        assert_eq!(config.grid_height, 24);
        assert_eq!(config.pixel_width(), 480);
        assert_eq!(config.pixel_height(), 480);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_differ_only_in_speed() {
        let classic = GameConfig::classic();
        let leveled = GameConfig::leveled();
        assert_eq!((classic.initial_speed, classic.speed_increment), (5, 1));
        assert_eq!((leveled.initial_speed, leveled.speed_increment), (10, 5));
        assert_eq!(
            GameConfig {
                initial_speed: 5,
                speed_increment: 1,
                ..leveled
            },
            classic
        );
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert_eq!(config.cell_count(), 180);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(GameConfig::new(0, 10).validate().is_err());
        assert!(GameConfig::new(1, 2).validate().is_err());
        assert!(
            GameConfig {
                cell_size: 0,
                ..Default::default()
            }
            .validate()
            .is_err()
        );
        assert!(
            GameConfig {
                level_up_score_step: 0,
                ..Default::default()
            }
            .validate()
            .is_err()
        );
        assert!(
            GameConfig {
                initial_speed: 0,
                ..Default::default()
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn test_validation_bounds_initial_speed() {
        let at_limit = GameConfig {
            initial_speed: MAX_INITIAL_SPEED,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());

        let too_fast = GameConfig {
            initial_speed: 2000,
            ..Default::default()
        };
        assert!(too_fast.validate().is_err());
    }

    #[test]
    fn test_load_partial_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "grid_width": 30, "speed_increment": 5 }"#).unwrap();

        let config = GameConfig::from_json_file(&path).unwrap();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 24);
        assert_eq!(config.speed_increment, 5);
    }

    #[test]
    fn test_load_invalid_json_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "cell_size": 0 }"#).unwrap();
        assert!(GameConfig::from_json_file(&path).is_err());

        assert!(GameConfig::from_json_file(&dir.path().join("missing.json")).is_err());
    }
}
