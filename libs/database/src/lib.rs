//! Database library providing the PostgreSQL connector and startup utilities
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL support with SeaORM
//! - `config` - Configuration support with `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//! use readiness::ReadinessConfig;
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_when_ready(config, &ReadinessConfig::default()).await?;
//! postgres::run_migrations::<Migrator>(&db, "users_server").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
