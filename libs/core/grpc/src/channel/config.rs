use core_config::{ConfigError, FromEnv, env_parse};
use std::time::Duration;
use tonic::transport::Endpoint;

/// How a users-service client dials the server
///
/// The connect timeout bounds one readiness probe against a host that does
/// not answer; the request timeout bounds every RPC after that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
  pub connect_timeout: Duration,
  pub request_timeout: Duration,

  /// HTTP/2 PING interval, `None` turns keep-alive off
  pub keep_alive_interval: Option<Duration>,
  pub keep_alive_timeout: Duration,

  pub tcp_nodelay: bool,
}

impl Default for ChannelConfig {
  fn default() -> Self {
    Self {
      connect_timeout: Duration::from_secs(5),
      request_timeout: Duration::from_secs(30),
      keep_alive_interval: Some(Duration::from_secs(30)),
      keep_alive_timeout: Duration::from_secs(10),
      tcp_nodelay: true,
    }
  }
}

impl ChannelConfig {
  pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
    self.connect_timeout = timeout;
    self
  }

  pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
    self.request_timeout = timeout;
    self
  }

  pub(crate) fn apply_to_endpoint(&self, endpoint: Endpoint) -> Endpoint {
    let endpoint = endpoint
      .connect_timeout(self.connect_timeout)
      .timeout(self.request_timeout)
      .tcp_nodelay(self.tcp_nodelay);

    match self.keep_alive_interval {
      Some(interval) => endpoint
        .http2_keep_alive_interval(interval)
        .keep_alive_timeout(self.keep_alive_timeout)
        .keep_alive_while_idle(true),
      None => endpoint,
    }
  }
}

/// Environment variables (all optional):
/// - `GRPC_CONNECT_TIMEOUT_MS` (default: 5000)
/// - `GRPC_REQUEST_TIMEOUT_SECS` (default: 30)
impl FromEnv for ChannelConfig {
  fn from_env() -> Result<Self, ConfigError> {
    let defaults = Self::default();
    let connect_ms = env_parse(
      "GRPC_CONNECT_TIMEOUT_MS",
      defaults.connect_timeout.as_millis() as u64,
    )?;
    let request_secs = env_parse("GRPC_REQUEST_TIMEOUT_SECS", defaults.request_timeout.as_secs())?;

    Ok(
      defaults
        .with_connect_timeout(Duration::from_millis(connect_ms))
        .with_request_timeout(Duration::from_secs(request_secs)),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_builder() {
    let config = ChannelConfig::default()
      .with_connect_timeout(Duration::from_millis(500))
      .with_request_timeout(Duration::from_secs(10));

    assert_eq!(config.connect_timeout, Duration::from_millis(500));
    assert_eq!(config.request_timeout, Duration::from_secs(10));
    assert_eq!(config.keep_alive_interval, Some(Duration::from_secs(30)));
    assert!(config.tcp_nodelay);
  }

  #[test]
  fn test_from_env() {
    temp_env::with_vars(
      [
        ("GRPC_CONNECT_TIMEOUT_MS", Some("250")),
        ("GRPC_REQUEST_TIMEOUT_SECS", None),
      ],
      || {
        let config = ChannelConfig::from_env().unwrap();
        assert_eq!(config.connect_timeout, Duration::from_millis(250));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
      },
    );
  }

  #[test]
  fn test_from_env_rejects_garbage() {
    temp_env::with_var("GRPC_CONNECT_TIMEOUT_MS", Some("soon"), || {
      let err = ChannelConfig::from_env().unwrap_err();
      assert!(err.to_string().contains("GRPC_CONNECT_TIMEOUT_MS"));
    });
  }
}
