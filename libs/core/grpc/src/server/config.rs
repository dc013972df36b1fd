//! Server configuration loaded from environment variables.

use crate::client::{DEFAULT_COMPRESSION, DEFAULT_MAX_MESSAGE_SIZE};
use crate::error::{GrpcError, GrpcResult};
use core_config::{ConfigError, FromEnv, env_flag, env_or_default, env_parse};
use std::net::SocketAddr;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 50051;

/// Configuration for gRPC server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to (default: 0.0.0.0, all interfaces)
    pub host: String,
    /// Port to listen on (default: 50051)
    pub port: u16,
    /// Enable Zstd compression (default: true)
    pub enable_compression: bool,
    /// Maximum message size in both directions (default: 8MB)
    pub max_message_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            enable_compression: true,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }
}

/// Reads:
/// - `GRPC_HOST` (default: 0.0.0.0)
/// - `GRPC_PORT` (default: 50051)
/// - `GRPC_COMPRESSION` (default: true; also `1`/`0`, `yes`/`no`, `on`/`off`)
/// - `GRPC_MAX_MESSAGE_SIZE` (default: 8388608 / 8MB)
impl FromEnv for ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_or_default("GRPC_HOST", DEFAULT_HOST),
            port: env_parse("GRPC_PORT", DEFAULT_PORT)?,
            enable_compression: env_flag("GRPC_COMPRESSION", true)?,
            max_message_size: env_parse("GRPC_MAX_MESSAGE_SIZE", DEFAULT_MAX_MESSAGE_SIZE)?,
        })
    }
}

impl ServerConfig {
    /// Get the socket address to bind to.
    pub fn socket_addr(&self) -> GrpcResult<SocketAddr> {
        let addr = self.addr_string();
        addr.parse()
            .map_err(|source| GrpcError::InvalidListenAddr { addr, source })
    }

    /// Get the address string (for logging).
    pub fn addr_string(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Encoding to advertise when compression is on
    pub fn compression(&self) -> Option<tonic::codec::CompressionEncoding> {
        self.enable_compression.then_some(DEFAULT_COMPRESSION)
    }
}
