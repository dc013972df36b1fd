pub mod tracing;

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Application environment, selects the log format
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development, // Pretty console logs
    Production,  // JSON logs for aggregation
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load and parse environment variable with a default value
///
/// The default is only used when the variable is unset; a set but
/// unparseable value is an error naming the key.
pub fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Load an on/off switch, defaulting when unset
///
/// Accepts `true`/`false`, `1`/`0`, `yes`/`no` and `on`/`off`, ignoring case.
pub fn env_flag(key: &str, default: bool) -> Result<bool, ConfigError> {
    let Ok(raw) = env::var(key) else {
        return Ok(default);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConfigError::ParseError {
            key: key.to_string(),
            details: format!("expected a boolean, got '{}'", other),
        }),
    }
}
