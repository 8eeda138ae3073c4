//! # Configuration
//!
//! Settings live in a TOML file (`config.toml` by default). Every section and
//! field has a default, so a missing file or a partial file is fine; a file
//! that exists but does not parse is an error.
//!
//! ```toml
//! [game]
//! save_file = "save_game.txt"
//! # seed = 1234          # fixed seed for reproducible runs
//!
//! [shop]
//! coin_price = 2
//! key_price = 5
//! exchange = "debit"     # or "legacy": buying a coin replaces the whole stash with one
//!
//! [logging]
//! level = "warn"
//! # file = "darkrooms.log"
//! ```
//!
//! `darkrooms init` writes this file with the defaults filled in.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::game::save::DEFAULT_SAVE_FILE;
use crate::game::ShopConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub shop: ShopConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Save file path, relative to the working directory unless absolute.
    #[serde(default = "default_save_file")]
    pub save_file: String,
    /// Fixed RNG seed. When unset the generator is seeded from the OS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_save_file() -> String {
    DEFAULT_SAVE_FILE.to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            save_file: default_save_file(),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn save_path(&self) -> PathBuf {
        PathBuf::from(&self.save_file)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `error`, `warn`, `info`, `debug` or `trace`. `-v` on the command line overrides it.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Append log lines to this file instead of stderr.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Parsed level; unknown names fall back to `warn`.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Warn)
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))?;

        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("config: {} not found, using defaults", path.display());
            Ok(Config::default())
        }
    }

    /// Create a default configuration file
    pub fn create_default(path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path.display(), e))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.game.save_file.trim().is_empty() {
            return Err(anyhow!("game.save_file must not be empty"));
        }
        if self.shop.coin_price == 0 {
            return Err(anyhow!("shop.coin_price must be at least 1"));
        }
        if self.shop.key_price == 0 {
            return Err(anyhow!("shop.key_price must be at least 1"));
        }
        Ok(())
    }
}
