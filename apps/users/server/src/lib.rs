//! Users gRPC Service
//!
//! Serves `users.v1.UsersService` backed by PostgreSQL.
//!
//! ## Architecture
//!
//! ```text
//! Client
//!   ↓ (gRPC with Zstd compression)
//! UsersServiceImpl (service.rs)
//!   ↓ (proto ↔ domain, UserError → Status)
//! UserService (domain layer: validation, error classification)
//!   ↓
//! PostgresUserRepository
//!   ↓
//! PostgreSQL
//! ```
//!
//! ## Startup
//!
//! Configuration and tracing come first, then the process blocks until
//! PostgreSQL answers `SELECT 1` (bounded retries, fixed delay), runs pending
//! migrations, marks itself serving and accepts requests until Ctrl-C.

pub mod config;
pub mod server;
pub mod service;

// Re-export for convenience
pub use config::Config;
pub use server::{run, serve};
pub use service::UsersServiceImpl;
