//! PostgreSQL test infrastructure
//!
//! Provides a `TestDatabase` helper that starts a PostgreSQL container and
//! applies the workspace migrations to it.

use migration::Migrator;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbBackend, Statement};
use sea_orm_migration::MigratorTrait;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;

/// Test database wrapper that ensures proper cleanup
///
/// The container is automatically stopped and removed when this struct is dropped.
pub struct TestDatabase {
    #[allow(dead_code)]
    container: ContainerAsync<Postgres>,
    pub connection: DatabaseConnection,
    pub connection_string: String,
    pub host: String,
    pub port: u16,
}

impl TestDatabase {
    /// Create a new test database with migrations applied
    ///
    /// # Example
    ///
    /// ```no_run
    /// use test_utils::TestDatabase;
    ///
    /// # async fn example() {
    /// let db = TestDatabase::new().await;
    /// // Use db.connection() to create your repository
    /// # }
    /// ```
    pub async fn new() -> Self {
        // Use Postgres 18 to match production
        let postgres = Postgres::default().with_tag("18-alpine");

        let container = postgres
            .start()
            .await
            .expect("Failed to start Postgres container");

        let host_port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get host port");

        let host = "127.0.0.1".to_string();
        let connection_string = format!(
            "postgres://postgres:postgres@{}:{}/postgres",
            host, host_port
        );

        let connection = Database::connect(&connection_string)
            .await
            .expect("Failed to connect to test database");

        Migrator::up(&connection, None)
            .await
            .expect("Failed to run migrations");

        tracing::info!(port = host_port, "Test database ready (Postgres 18)");

        Self {
            container,
            connection,
            connection_string,
            host,
            port: host_port,
        }
    }

    /// Get a cloned connection (useful for passing to repositories)
    pub fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Number of rows currently in the users table
    pub async fn count_users(&self) -> i64 {
        let row = self
            .connection
            .query_one_raw(Statement::from_string(
                DbBackend::Postgres,
                "SELECT COUNT(*) AS count FROM users",
            ))
            .await
            .expect("Failed to count users")
            .expect("COUNT returned no row");

        row.try_get::<i64>("", "count").expect("Failed to read count")
    }
}

// Container is automatically cleaned up when TestDatabase is dropped
impl Drop for TestDatabase {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test database container");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_creation() {
        let db = TestDatabase::new().await;
        assert!(db.connection_string.contains("postgres://"));
        assert_eq!(db.count_users().await, 0);
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = TestDatabase::new().await;

        Migrator::up(&db.connection, None)
            .await
            .expect("second migration run should be a no-op");
        assert_eq!(db.count_users().await, 0);
    }
}
