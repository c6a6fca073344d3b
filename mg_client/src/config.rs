//! Client configuration management.
//!
//! Reads environment variables (and `.env`, loaded by `main`), applies CLI
//! overrides and validates the result.

use memory_game::{
    DEFAULT_API_URL, DEFAULT_ROSTER_SIZE, RESET_DELAY, SessionSettings,
    constants::MAX_ROSTER_SIZE,
};
use std::{path::PathBuf, time::Duration};

/// Longest accepted pause between rounds
const MAX_RESET_DELAY_MS: u64 = 60_000;

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Character listing endpoint
    pub api_url: String,
    /// Number of cards dealt
    pub roster_size: usize,
    /// Pause after a win or game over
    pub reset_delay: Duration,
    /// Log file; `None` logs to stderr
    pub log_file: Option<PathBuf>,
    /// Fixed shuffle seed
    pub seed: Option<u64>,
}

/// Values given on the command line, which win over the environment
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_url: Option<String>,
    pub roster_size: Option<usize>,
    pub reset_delay_ms: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if the resulting configuration is invalid
    pub fn from_env(overrides: CliOverrides) -> Result<Self, ConfigError> {
        Self::from_lookup(overrides, |key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` to read variables
    pub fn from_lookup<F>(overrides: CliOverrides, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = overrides
            .api_url
            .or_else(|| lookup("MEMORY_GAME_API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let roster_size = overrides
            .roster_size
            .unwrap_or_else(|| parse_or(&lookup, "MEMORY_GAME_CARDS", DEFAULT_ROSTER_SIZE));

        let reset_delay_ms = overrides.reset_delay_ms.unwrap_or_else(|| {
            parse_or(
                &lookup,
                "MEMORY_GAME_RESET_DELAY_MS",
                RESET_DELAY.as_millis() as u64,
            )
        });

        let log_file = overrides
            .log_file
            .or_else(|| lookup("MEMORY_GAME_LOG_FILE").map(PathBuf::from));

        let seed = overrides
            .seed
            .or_else(|| lookup("MEMORY_GAME_SEED").and_then(|v| v.parse().ok()));

        let config = ClientConfig {
            api_url,
            roster_size,
            reset_delay: Duration::from_millis(reset_delay_ms),
            log_file,
            seed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                var: "MEMORY_GAME_API_URL".to_string(),
                reason: format!("'{}' is not an http(s) URL", self.api_url),
            });
        }

        if self.roster_size == 0 || self.roster_size > MAX_ROSTER_SIZE {
            return Err(ConfigError::Invalid {
                var: "MEMORY_GAME_CARDS".to_string(),
                reason: format!("Must be between 1 and {MAX_ROSTER_SIZE}"),
            });
        }

        let delay_ms = self.reset_delay.as_millis();
        if delay_ms == 0 || delay_ms > u128::from(MAX_RESET_DELAY_MS) {
            return Err(ConfigError::Invalid {
                var: "MEMORY_GAME_RESET_DELAY_MS".to_string(),
                reason: format!("Must be between 1 and {MAX_RESET_DELAY_MS}"),
            });
        }

        Ok(())
    }

    /// Settings for a game session
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            roster_size: self.roster_size,
            reset_delay: self.reset_delay,
            seed: self.seed,
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse a variable with default fallback
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
