use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use super::grid::Grid;

/// Largest grid side accepted by [`GameConfig::validate`]
pub const MAX_NUM_ROWS: usize = 1024;

/// Accepted `tick_rate` range, exclusive below and inclusive above
pub const MIN_TICK_RATE: f64 = 0.01;
pub const MAX_TICK_RATE: f64 = 1000.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// An RGB triple, written as `[r, g, b]` in TOML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colors used by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub snake: Rgb,
    pub food: Rgb,
    pub grid: Rgb,
    pub text: Rgb,
    pub background: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            snake: Rgb(125, 131, 255),
            food: Rgb(26, 255, 213),
            grid: Rgb(128, 128, 128),
            text: Rgb(221, 220, 255),
            background: Rgb(0, 0, 0),
        }
    }
}

/// Size of the board on screen, in terminal columns and rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: u16,
    pub height: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 20,
        }
    }
}

/// Configuration for the game
///
/// Loaded once at startup and shared read-only by the snake, the food and the
/// game loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square grid, in cells
    pub num_rows: usize,
    /// Board size on screen
    pub display: DisplayConfig,
    /// Simulation ticks per second
    pub tick_rate: f64,
    pub colors: Palette,
    /// Points awarded per food eaten
    pub score_increment: u32,
    /// Segments added per food eaten
    pub growth_per_food: usize,
    /// Cells travelled per tick
    pub speed: i32,
    /// Random draws tried before food placement scans for free cells
    pub max_food_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_rows: 20,
            display: DisplayConfig::default(),
            tick_rate: 5.0,
            colors: Palette::default(),
            score_increment: 10,
            growth_per_food: 1,
            speed: 1,
            max_food_attempts: 1000,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(num_rows: usize) -> Self {
        Self {
            num_rows,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Read a TOML file; keys that are missing keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_rows < 2 {
            return Err(ConfigError::invalid(
                "num_rows",
                format!("must be at least 2, got {}", self.num_rows),
            ));
        }

        if self.num_rows > MAX_NUM_ROWS {
            return Err(ConfigError::invalid(
                "num_rows",
                format!("must be at most {MAX_NUM_ROWS}, got {}", self.num_rows),
            ));
        }

        if !(self.tick_rate > MIN_TICK_RATE && self.tick_rate <= MAX_TICK_RATE) {
            return Err(ConfigError::invalid(
                "tick_rate",
                format!(
                    "must be in ({MIN_TICK_RATE}, {MAX_TICK_RATE}], got {}",
                    self.tick_rate
                ),
            ));
        }

        if self.speed < 1 || self.speed as usize >= self.num_rows {
            return Err(ConfigError::invalid(
                "speed",
                format!(
                    "must be in [1, {}), got {}",
                    self.num_rows, self.speed
                ),
            ));
        }

        if self.growth_per_food == 0 {
            return Err(ConfigError::invalid("growth_per_food", "must be at least 1"));
        }

        if self.max_food_attempts == 0 {
            return Err(ConfigError::invalid("max_food_attempts", "must be at least 1"));
        }

        if self.display.width == 0 || self.display.height == 0 {
            return Err(ConfigError::invalid(
                "display",
                format!(
                    "must be non-empty, got {}x{}",
                    self.display.width, self.display.height
                ),
            ));
        }

        Ok(())
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.num_rows as i32)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate)
    }
}
