//! Game configuration
//!
//! Layered settings: built-in defaults, then an optional TOML file, then
//! `MYSTIC_`-prefixed environment variables.

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::explore::DEFAULT_ENCOUNTER_CHANCE;

/// Config file read when no explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = "mystic.toml";

/// Save file used when none is configured
pub const DEFAULT_SAVE_FILE: &str = "game_progress.json";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where the roster is saved
    pub save_path: PathBuf,
    /// RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
    /// Characters created for a new game
    pub party_size: usize,
    /// Probability that an exploration step leads to combat
    pub encounter_chance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from(DEFAULT_SAVE_FILE),
            seed: None,
            party_size: 2,
            encounter_chance: DEFAULT_ENCOUNTER_CHANCE,
        }
    }
}

impl Config {
    /// Load config from defaults, `file` (or [`DEFAULT_CONFIG_FILE`]) and the environment.
    ///
    /// An explicit `file` must exist; the default file is optional.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match file {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::Invalid(format!(
                    "config file {} not found",
                    path.display()
                )));
            }
            Some(path) => path,
            None => Path::new(DEFAULT_CONFIG_FILE),
        };
        Self::from_figment(
            Figment::from(Serialized::defaults(Config::default()))
                .merge(Toml::file(file))
                .merge(Env::prefixed("MYSTIC_")),
        )
    }

    /// Extract and validate config from a prepared figment
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Config = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.party_size == 0 {
            return Err(ConfigError::Invalid("party_size must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.encounter_chance) {
            return Err(ConfigError::Invalid(format!(
                "encounter_chance {} outside 0.0..=1.0",
                self.encounter_chance
            )));
        }
        Ok(())
    }

    /// Set the save path
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = path.into();
        self
    }

    /// Set the RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
