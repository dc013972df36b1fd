use readiness::ReadinessError;

/// Unified database error type for connector and startup operations
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// PostgreSQL-specific errors (SeaORM)
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    /// The database never answered the readiness probe
    #[error("Database not ready: {0}")]
    NotReady(#[from] ReadinessError),

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
