use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, FromQueryResult, Statement};

use crate::error::{StoreError, StoreResult};
use crate::models::{NewUser, User, UserFilter};
use crate::repository::UserRepository;

/// PostgreSQL implementation of UserRepository using SeaORM
///
/// All statements are parameterized; user input is never interpolated.
#[derive(Clone)]
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Helper struct for deserializing user rows from the database
#[derive(Debug, FromQueryResult)]
struct UserRow {
    id: i32,
    name: String,
    email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, input: NewUser) -> StoreResult<User> {
        let sql = "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id, name, email";

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [input.name.into(), input.email.into()],
        );

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::Backend("INSERT returned no row".to_string()))?;

        Ok(row.into())
    }

    async fn list(&self, filter: UserFilter) -> StoreResult<Vec<User>> {
        let stmt = match filter.name_contains {
            Some(name) => Statement::from_sql_and_values(
                DbBackend::Postgres,
                "SELECT id, name, email FROM users \
                 WHERE POSITION(LOWER($1) IN LOWER(name)) > 0 \
                 ORDER BY id ASC",
                [name.into()],
            ),
            None => Statement::from_string(
                DbBackend::Postgres,
                "SELECT id, name, email FROM users ORDER BY id ASC",
            ),
        };

        let rows = UserRow::find_by_statement(stmt).all(&self.db).await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: i32) -> StoreResult<bool> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "DELETE FROM users WHERE id = $1",
            [id.into()],
        );

        let result = self.db.execute_raw(stmt).await?;

        Ok(result.rows_affected() > 0)
    }
}
