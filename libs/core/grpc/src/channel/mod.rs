pub mod config;

pub use config::ChannelConfig;

use crate::error::{GrpcError, GrpcResult};
use tonic::transport::{Channel, Endpoint};

/// Lazy channel with default settings, see [`create_channel_lazy_with_config`].
pub fn create_channel_lazy(addr: impl Into<String>) -> GrpcResult<Channel> {
  create_channel_lazy_with_config(addr, ChannelConfig::default())
}

/// Lazy channel to `addr`
///
/// Only the URI is checked here. The server is dialed on the first RPC, and
/// a server that is not up yet shows as `UNAVAILABLE` on that call.
pub fn create_channel_lazy_with_config(
  addr: impl Into<String>,
  config: ChannelConfig,
) -> GrpcResult<Channel> {
  let addr = addr.into();

  let endpoint = match Endpoint::from_shared(addr.clone()) {
    Ok(endpoint) => config.apply_to_endpoint(endpoint),
    Err(e) => {
      tracing::error!(target: "grpc_client", addr = %addr, error = %e, "Invalid server address");
      return Err(GrpcError::InvalidUri(e));
    }
  };

  tracing::debug!(
    target: "grpc_client",
    addr = %addr,
    connect_timeout = ?config.connect_timeout,
    "Created lazy channel"
  );

  Ok(endpoint.connect_lazy())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_invalid_uri() {
    let result = create_channel_lazy("not a valid uri");
    assert!(matches!(result.unwrap_err(), GrpcError::InvalidUri(_)));
  }

  #[tokio::test]
  async fn test_lazy_channel_needs_no_server() {
    // Nothing listens on port 1
    assert!(create_channel_lazy("http://127.0.0.1:1").is_ok());
  }
}
