use readiness::{ReadinessConfig, wait_until_ready};
use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::{PostgresConfig, check_health};
use crate::common::DatabaseResult;

/// Build a lazily connected pool from a PostgresConfig
///
/// No connection is opened here, so this succeeds even while PostgreSQL is
/// still starting. Pair it with [`connect_when_ready`] or [`check_health`]
/// before serving traffic.
///
/// # Example
/// ```ignore
/// use database::postgres::{PostgresConfig, connect};
///
/// let db = connect(PostgresConfig::default()).await?;
/// ```
pub async fn connect(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    info!(url = %config.redacted_url(), "Creating PostgreSQL connection pool");
    Database::connect(config.into_connect_options()).await
}

/// Create the pool and block until PostgreSQL answers `SELECT 1`
///
/// Probes run under the readiness budget; when the budget runs out the error
/// carries the last probe failure.
///
/// # Example
/// ```ignore
/// use database::postgres::{PostgresConfig, connect_when_ready};
/// use readiness::ReadinessConfig;
///
/// let readiness = ReadinessConfig::new(10, Duration::from_secs(3));
/// let db = connect_when_ready(PostgresConfig::from_env()?, &readiness).await?;
/// ```
pub async fn connect_when_ready(
    config: PostgresConfig,
    readiness: &ReadinessConfig,
) -> DatabaseResult<DatabaseConnection> {
    let db = connect(config).await?;

    wait_until_ready("postgres", readiness, || check_health(&db)).await?;

    info!("Successfully connected to PostgreSQL database");
    Ok(db)
}

/// Run database migrations using the provided Migrator
///
/// # Example
/// ```ignore
/// use migration::Migrator;
/// use database::postgres::run_migrations;
///
/// run_migrations::<Migrator>(&db, "users_server").await?;
/// ```
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!("Running {} database migrations...", app_name);
    M::up(db, None).await?;
    info!("Migrations completed successfully for {}", app_name);
    Ok(())
}
