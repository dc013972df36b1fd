//! # gRPC Client Library
//!
//! Shared gRPC plumbing for the users service and its callers: channel
//! creation with HTTP/2 tuning, the compression and message-size conventions
//! both peers agree on, and (feature `server`) listener configuration with
//! `grpc.health.v1` reporting.
//!
//! ## Quick Start
//!
//! ```ignore
//! use grpc_client::{create_channel_lazy, DEFAULT_COMPRESSION, DEFAULT_MAX_MESSAGE_SIZE};
//! use rpc::users::v1::users_service_client::UsersServiceClient;
//!
//! // Returns immediately; the first RPC opens the connection
//! let channel = create_channel_lazy("http://localhost:50051")?;
//! let client = UsersServiceClient::new(channel)
//!     .accept_compressed(DEFAULT_COMPRESSION)
//!     .send_compressed(DEFAULT_COMPRESSION)
//!     .max_decoding_message_size(DEFAULT_MAX_MESSAGE_SIZE)
//!     .max_encoding_message_size(DEFAULT_MAX_MESSAGE_SIZE);
//! ```
//!
//! ### With Custom Configuration
//! ```ignore
//! use grpc_client::{create_channel_lazy_with_config, ChannelConfig};
//! use std::time::Duration;
//!
//! let config = ChannelConfig::default()
//!     .with_connect_timeout(Duration::from_secs(1))
//!     .with_request_timeout(Duration::from_secs(10));
//!
//! let channel = create_channel_lazy_with_config("http://localhost:50051", config)?;
//! ```

pub mod channel;
pub mod client;
pub mod error;

#[cfg(feature = "server")]
pub mod server;

// Re-export main types and functions for convenience
pub use channel::{ChannelConfig, create_channel_lazy, create_channel_lazy_with_config};
pub use client::{DEFAULT_COMPRESSION, DEFAULT_MAX_MESSAGE_SIZE};
pub use error::{GrpcError, GrpcResult};
