use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::models::{NewUser, User, UserFilter};

/// Repository trait for User persistence
///
/// Uniqueness of email is enforced here, by the store, and reported as
/// [`StoreError::UniqueViolation`]. Callers never pre-check it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return it with its assigned id
    async fn create(&self, input: NewUser) -> StoreResult<User>;

    /// List users matching the filter, ordered by ascending id
    async fn list(&self, filter: UserFilter) -> StoreResult<Vec<User>>;

    /// Delete a user by ID; `false` when no such user existed
    async fn delete(&self, id: i32) -> StoreResult<bool>;
}

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<i32, User>,
    last_id: i32,
}

/// In-memory implementation of UserRepository (for development/testing)
///
/// Ids start at 1 and are never reused. The duplicate check and the insert
/// happen under one write lock, so concurrent creates with the same email
/// yield exactly one success.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: NewUser) -> StoreResult<User> {
        let mut state = self.state.write().await;

        let email = input.email.to_lowercase();
        if state.users.values().any(|u| u.email.to_lowercase() == email) {
            return Err(StoreError::UniqueViolation(format!(
                "Key (email)=({}) already exists.",
                input.email
            )));
        }

        state.last_id += 1;
        let user = User {
            id: state.last_id,
            name: input.name,
            email: input.email,
        };
        state.users.insert(user.id, user.clone());

        tracing::debug!(user_id = user.id, "Inserted user");
        Ok(user)
    }

    async fn list(&self, filter: UserFilter) -> StoreResult<Vec<User>> {
        let state = self.state.read().await;

        // BTreeMap iterates in ascending id order
        Ok(state
            .users
            .values()
            .filter(|u| filter.matches(u))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: i32) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        Ok(state.users.remove(&id).is_some())
    }
}
