//! Server and session configuration
//!
//! Defaults reproduce the standard ruleset. A TOML file can override any
//! field; the binary then applies command-line overrides on top.

use crate::core::error::{ClashError, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Rules for a single battle session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Countdown from the start of play until a timeout verdict (seconds)
    pub time_limit_secs: u64,

    /// Experience awarded to the winner of a session
    ///
    /// The loser always receives nothing, and a draw awards nobody.
    pub win_exp: u32,

    /// Fixed seed for hand shuffles and critical rolls
    ///
    /// `None` draws a fresh seed from the OS for every session.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: 180,
            win_exp: 30,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs)
    }
}

/// Top-level server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the TCP listener binds to
    pub bind: SocketAddr,

    /// JSON file holding user records and their progression
    pub users_path: PathBuf,

    pub session: SessionConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            users_path: PathBuf::from("users.json"),
            session: SessionConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load a config from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse a config from a TOML string; missing fields keep their defaults
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: ServerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.session.time_limit_secs == 0 {
            return Err(ClashError::Config(
                "session.time_limit_secs must be positive".into(),
            ));
        }
        if self.users_path.as_os_str().is_empty() {
            return Err(ClashError::Config("users_path must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_standard_rules() {
        let config = ServerConfig::default();
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.session.time_limit(), Duration::from_secs(180));
        assert_eq!(config.session.win_exp, 30);
        assert!(config.session.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ServerConfig::parse_toml(
            r#"
            users_path = "data/players.json"

            [session]
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.users_path, PathBuf::from("data/players.json"));
        assert_eq!(config.session.seed, Some(7));
        assert_eq!(config.session.time_limit_secs, 180);
        assert_eq!(config.bind.port(), 8080);
    }

    #[test]
    fn test_zero_time_limit_rejected() {
        let result = ServerConfig::parse_toml("[session]\ntime_limit_secs = 0\n");
        assert!(matches!(result, Err(ClashError::Config(_))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let result = ServerConfig::parse_toml("bind = 12");
        assert!(matches!(result, Err(ClashError::Toml(_))));
    }
}
