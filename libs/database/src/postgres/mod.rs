//! PostgreSQL connector and utilities
//!
//! Provides lazy pool creation, the startup readiness wait and migration running.

mod config;
mod connector;
mod health;

pub use config::PostgresConfig;
pub use connector::{connect, connect_when_ready, run_migrations};
pub use health::check_health;

// Re-export SeaORM types for convenience
pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
pub use sea_orm_migration::MigratorTrait;
