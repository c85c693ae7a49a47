//! Configuration for the relay.
//!
//! All settings come from environment variables with sensible defaults,
//! and are validated eagerly at startup so misconfiguration fails fast
//! instead of surfacing later inside a background task.

use crate::error::RelayError;
use std::env;
use std::time::Duration;

/// Loki push endpoint path, relative to the base URL.
pub const LOKI_PUSH_PATH: &str = "/loki/api/v1/push";

/// Loki range-query endpoint path.
pub const LOKI_QUERY_RANGE_PATH: &str = "/loki/api/v1/query_range";

/// Loki label-names endpoint path.
pub const LOKI_LABELS_PATH: &str = "/loki/api/v1/labels";

/// Timeout applied to every request against Loki. Push and query calls
/// must never hang indefinitely.
pub const LOKI_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Relay configuration, sourced from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Loki instance (e.g. `http://localhost:3100`).
    pub loki_url: String,
    /// Default label pair as a `key:value` string, attached to every
    /// self-log that carries no explicit labels.
    pub default_label: String,
    /// Host the REST API binds to.
    pub host: String,
    /// Port the REST API binds to.
    pub port: u16,
    /// Local log verbosity (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loki_url: "http://localhost:3100".to_string(),
            default_label: "app:main".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8081,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, RelayError> {
        let defaults = Config::default();

        let loki_url = env::var("LOKI_URL").unwrap_or(defaults.loki_url);
        let default_label = env::var("DEFAULT_LABEL").unwrap_or(defaults.default_label);
        let host = env::var("RELAY_HOST").unwrap_or(defaults.host);
        let port = env::var("RELAY_PORT")
            .ok()
            .and_then(|port| port.parse::<u16>().ok())
            .unwrap_or(defaults.port);
        let log_level = env::var("LOG_LEVEL")
            .map(|val| val.to_lowercase())
            .unwrap_or(defaults.log_level);

        let config = Self {
            loki_url,
            default_label,
            host,
            port,
            log_level,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), RelayError> {
        if self.loki_url.trim().is_empty() {
            return Err(RelayError::InvalidConfig(
                "LOKI_URL cannot be empty".to_string(),
            ));
        }

        if self.default_label.trim().is_empty() {
            return Err(RelayError::InvalidConfig(
                "DEFAULT_LABEL cannot be empty".to_string(),
            ));
        }

        if self.port == 0 {
            return Err(RelayError::InvalidConfig(
                "Relay port must be greater than 0".to_string(),
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.as_str()) {
            return Err(RelayError::InvalidConfig(format!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.log_level
            )));
        }

        Ok(())
    }

    /// Loki label-values endpoint path for one label name.
    #[must_use]
    pub fn label_values_path(label_name: &str) -> String {
        format!("/loki/api/v1/label/{label_name}/values")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_loki_url() {
        let config = Config {
            loki_url: "   ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_default_label() {
        let config = Config {
            default_label: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_invalid_port() {
        let config = Config {
            port: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let config = Config {
            log_level: "verbose".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_valid_log_levels() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            let config = Config {
                log_level: level.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_ok(), "level '{level}' should be valid");
        }
    }

    #[test]
    fn test_label_values_path() {
        assert_eq!(
            Config::label_values_path("app"),
            "/loki/api/v1/label/app/values"
        );
    }
}
