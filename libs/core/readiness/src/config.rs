use core_config::{env_parse, ConfigError};
use std::time::Duration;

use crate::ReadinessConfig;

impl ReadinessConfig {
    /// Load a readiness budget from `{prefix}_READY_MAX_ATTEMPTS` and
    /// `{prefix}_READY_DELAY_SECS`, falling back to `defaults` for unset keys.
    ///
    /// ```ignore
    /// // DB_READY_MAX_ATTEMPTS / DB_READY_DELAY_SECS
    /// let config = ReadinessConfig::from_env("DB", ReadinessConfig::new(10, Duration::from_secs(3)))?;
    /// ```
    pub fn from_env(prefix: &str, defaults: ReadinessConfig) -> Result<Self, ConfigError> {
        let max_attempts = env_parse(
            &format!("{}_READY_MAX_ATTEMPTS", prefix),
            defaults.max_attempts,
        )?;
        let delay_secs = env_parse(
            &format!("{}_READY_DELAY_SECS", prefix),
            defaults.delay.as_secs(),
        )?;

        Ok(defaults
            .with_max_attempts(max_attempts)
            .with_delay(Duration::from_secs(delay_secs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> ReadinessConfig {
        ReadinessConfig::new(10, Duration::from_secs(3))
    }

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars_unset(["DB_READY_MAX_ATTEMPTS", "DB_READY_DELAY_SECS"], || {
            let config = ReadinessConfig::from_env("DB", defaults()).unwrap();
            assert_eq!(config, defaults());
        });
    }

    #[test]
    fn test_from_env_custom() {
        temp_env::with_vars(
            [
                ("SERVER_READY_MAX_ATTEMPTS", Some("4")),
                ("SERVER_READY_DELAY_SECS", Some("1")),
            ],
            || {
                let config = ReadinessConfig::from_env("SERVER", defaults()).unwrap();
                assert_eq!(config.max_attempts, 4);
                assert_eq!(config.delay, Duration::from_secs(1));
            },
        );
    }

    #[test]
    fn test_from_env_invalid_number() {
        temp_env::with_var("DB_READY_DELAY_SECS", Some("soon"), || {
            let err = ReadinessConfig::from_env("DB", defaults()).unwrap_err();
            assert!(err.to_string().contains("DB_READY_DELAY_SECS"));
        });
    }
}
