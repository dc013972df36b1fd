//! gRPC Server helpers
//!
//! Listener configuration plus `grpc.health.v1` reporting.
//!
//! ```ignore
//! use grpc_client::server::{GrpcServer, ServerConfig, create_health_service};
//! use rpc::users::v1::users_service_server::{UsersServiceServer, SERVICE_NAME};
//! use tonic::transport::Server;
//!
//! let config = ServerConfig::from_env()?;
//! let (health_reporter, health_service) = create_health_service();
//!
//! GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;
//! GrpcServer::log_startup(&config, SERVICE_NAME);
//!
//! Server::builder()
//!     .add_service(health_service)
//!     .add_service(
//!         UsersServiceServer::new(my_impl)
//!             .max_decoding_message_size(config.max_message_size)
//!             .max_encoding_message_size(config.max_message_size),
//!     )
//!     .serve(config.socket_addr()?)
//!     .await?;
//! ```

mod builder;
mod config;

pub use builder::{GrpcServer, create_health_service};
pub use config::ServerConfig;
