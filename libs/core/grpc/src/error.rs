use thiserror::Error;

pub type GrpcResult<T> = Result<T, GrpcError>;

/// Errors raised while setting up gRPC channels and listeners
#[derive(Error, Debug)]
pub enum GrpcError {
  /// Invalid URI provided for connection
  #[error("Invalid URI: {0}")]
  InvalidUri(#[from] tonic::transport::Error),

  /// Listener host/port do not form a socket address
  #[error("Invalid listen address '{addr}': {source}")]
  InvalidListenAddr {
    addr: String,
    source: std::net::AddrParseError,
  },

  /// Invalid configuration
  #[error("Invalid configuration: {0}")]
  InvalidConfig(#[from] core_config::ConfigError),
}
