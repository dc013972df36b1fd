use core_config::{ConfigError, FromEnv, env_or_default};
use grpc_client::ChannelConfig;
use readiness::ReadinessConfig;
use std::time::Duration;

pub use core_config::Environment;

const DEFAULT_SERVER_ADDR: &str = "http://localhost:50051";

/// Readiness budget for the users server: 10 probes, 2 seconds apart
pub fn default_server_readiness() -> ReadinessConfig {
    ReadinessConfig::new(10, Duration::from_secs(2))
}

/// Invoker process configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    /// `USERS_SERVICE_ADDR`
    pub server_addr: String,
    /// `SERVER_READY_MAX_ATTEMPTS` / `SERVER_READY_DELAY_SECS`
    pub server_readiness: ReadinessConfig,
    pub channel: ChannelConfig,
}

impl FromEnv for Config {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            environment: Environment::from_env(),
            server_addr: env_or_default("USERS_SERVICE_ADDR", DEFAULT_SERVER_ADDR),
            server_readiness: ReadinessConfig::from_env("SERVER", default_server_readiness())?,
            channel: ChannelConfig::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        temp_env::with_vars_unset(
            [
                "USERS_SERVICE_ADDR",
                "SERVER_READY_MAX_ATTEMPTS",
                "SERVER_READY_DELAY_SECS",
                "GRPC_CONNECT_TIMEOUT_MS",
                "GRPC_REQUEST_TIMEOUT_SECS",
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.server_addr, "http://localhost:50051");
                assert_eq!(config.server_readiness, default_server_readiness());
                assert_eq!(config.channel, ChannelConfig::default());
            },
        );
    }

    #[test]
    fn test_overrides() {
        temp_env::with_vars(
            [
                ("USERS_SERVICE_ADDR", Some("http://users-server:50051")),
                ("SERVER_READY_MAX_ATTEMPTS", Some("30")),
                ("SERVER_READY_DELAY_SECS", Some("1")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.server_addr, "http://users-server:50051");
                assert_eq!(config.server_readiness.max_attempts, 30);
                assert_eq!(config.server_readiness.delay, Duration::from_secs(1));
            },
        );
    }
}
