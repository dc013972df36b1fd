use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::error::{StoreError, UserError, UserResult};
use crate::models::{User, UserFilter};
use crate::repository::UserRepository;
use crate::validation::{validate_new_user, validate_user_id};

pub const MSG_EMAIL_TAKEN: &str = "User with this email already exists";
pub const MSG_CREATE_FAILED: &str = "Failed to create user";
pub const MSG_LIST_FAILED: &str = "Failed to retrieve users";
pub const MSG_DELETE_FAILED: &str = "Failed to delete user";

/// Confirmation returned by a successful delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedUser {
    pub id: i32,
    pub message: String,
}

/// Service layer for User business logic
///
/// Each call is a single attempt against the store. Store failures are
/// logged here and replaced by a fixed message before they reach the caller.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Validate, normalize and insert a new user
    #[instrument(skip(self))]
    pub async fn create_user(&self, name: &str, email: &str) -> UserResult<User> {
        let input = validate_new_user(name, email)?;

        match self.repository.create(input).await {
            Ok(user) => {
                info!(user_id = user.id, "Created user");
                Ok(user)
            }
            Err(StoreError::UniqueViolation(_)) => {
                Err(UserError::AlreadyExists(MSG_EMAIL_TAKEN.to_string()))
            }
            Err(e) => {
                error!(error = %e, "Failed to create user");
                Err(UserError::Internal(MSG_CREATE_FAILED.to_string()))
            }
        }
    }

    /// List users, optionally filtered by a case-insensitive name substring
    #[instrument(skip(self))]
    pub async fn list_users(&self, name_filter: Option<&str>) -> UserResult<Vec<User>> {
        self.repository
            .list(UserFilter::from_name(name_filter))
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to retrieve users");
                UserError::Internal(MSG_LIST_FAILED.to_string())
            })
    }

    /// Delete a user by ID
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: i32) -> UserResult<DeletedUser> {
        let id = validate_user_id(id)?;

        let deleted = self.repository.delete(id).await.map_err(|e| {
            error!(error = %e, "Failed to delete user");
            UserError::Internal(MSG_DELETE_FAILED.to_string())
        })?;

        if !deleted {
            return Err(UserError::NotFound(format!("User with ID {} not found", id)));
        }

        info!(user_id = id, "Deleted user");
        Ok(DeletedUser {
            id,
            message: format!("User with ID {} deleted successfully", id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewUser;
    use crate::repository::{InMemoryUserRepository, MockUserRepository};
    use crate::validation::{MSG_ALL_FIELDS_REQUIRED, MSG_INVALID_EMAIL, MSG_NAME_EMPTY};

    fn service() -> UserService<InMemoryUserRepository> {
        UserService::new(InMemoryUserRepository::new())
    }

    #[tokio::test]
    async fn test_create_normalizes_input() {
        let service = service();

        let user = service
            .create_user("  Ana Jovanović ", "Ana.Jovanovic@Example.com")
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.name, "Ana Jovanović");
        assert_eq!(user.email, "ana.jovanovic@example.com");
    }

    #[tokio::test]
    async fn test_create_duplicate_email_differing_in_case() {
        let service = service();
        service.create_user("Ana", "ana@example.com").await.unwrap();

        let err = service.create_user("Ana", "ANA@EXAMPLE.COM").await.unwrap_err();

        assert_eq!(err, UserError::AlreadyExists(MSG_EMAIL_TAKEN.to_string()));
    }

    #[tokio::test]
    async fn test_invalid_create_leaves_store_unchanged() {
        let service = service();
        service.create_user("Marko", "marko@example.com").await.unwrap();

        for (name, email, message) in [
            ("", "a@b.co", MSG_ALL_FIELDS_REQUIRED),
            ("Ana", "", MSG_ALL_FIELDS_REQUIRED),
            ("   ", "a@b.co", MSG_NAME_EMPTY),
            ("Ana", "not-an-email", MSG_INVALID_EMAIL),
        ] {
            let first = service.create_user(name, email).await.unwrap_err();
            let second = service.create_user(name, email).await.unwrap_err();
            assert_eq!(first, UserError::InvalidArgument(message.to_string()));
            assert_eq!(first, second);
        }

        assert_eq!(service.list_users(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_validation_runs_before_store() {
        // No expectations set: any repository call would panic
        let service = UserService::new(MockUserRepository::new());

        assert!(matches!(
            service.create_user("Ana", "not-an-email").await,
            Err(UserError::InvalidArgument(_))
        ));
        assert!(matches!(
            service.delete_user(0).await,
            Err(UserError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_create_store_failure_is_internal() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_create()
            .withf(|input: &NewUser| input.email == "ana@example.com")
            .times(1)
            .returning(|_| Err(StoreError::Backend("connection reset".to_string())));

        let service = UserService::new(mock_repo);
        let err = service.create_user("Ana", "ana@example.com").await.unwrap_err();

        assert_eq!(err, UserError::Internal(MSG_CREATE_FAILED.to_string()));
    }

    #[tokio::test]
    async fn test_create_unique_violation_from_store() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_create()
            .returning(|_| Err(StoreError::UniqueViolation("users_email_key".to_string())));

        let service = UserService::new(mock_repo);
        let err = service.create_user("Ana", "ana@example.com").await.unwrap_err();

        assert_eq!(err, UserError::AlreadyExists(MSG_EMAIL_TAKEN.to_string()));
    }

    #[tokio::test]
    async fn test_list_store_failure_is_internal() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_list()
            .returning(|_| Err(StoreError::Backend("relation \"users\" does not exist".into())));

        let service = UserService::new(mock_repo);
        let err = service.list_users(Some("nik")).await.unwrap_err();

        assert_eq!(err, UserError::Internal(MSG_LIST_FAILED.to_string()));
    }

    #[tokio::test]
    async fn test_delete_store_failure_is_internal() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_delete()
            .with(mockall::predicate::eq(3))
            .returning(|_| Err(StoreError::Backend("timeout".to_string())));

        let service = UserService::new(mock_repo);
        let err = service.delete_user(3).await.unwrap_err();

        assert_eq!(err, UserError::Internal(MSG_DELETE_FAILED.to_string()));
    }

    #[tokio::test]
    async fn test_list_passes_trimmed_filter() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_list()
            .withf(|filter: &UserFilter| filter.name_contains.as_deref() == Some("nik"))
            .returning(|_| Ok(vec![]));

        let service = UserService::new(mock_repo);
        assert!(service.list_users(Some("  nik  ")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_demo_scenario() {
        let service = service();
        service.create_user("Marko Petrović", "marko@example.com").await.unwrap();
        let ana = service.create_user("Ana Jovanović", "ana@example.com").await.unwrap();
        service.create_user("Nikola Nikolić", "nikola@example.com").await.unwrap();

        let nik = service.list_users(Some("nik")).await.unwrap();
        assert_eq!(nik.len(), 1);
        assert_eq!(nik[0].name, "Nikola Nikolić");

        let deleted = service.delete_user(ana.id).await.unwrap();
        assert_eq!(deleted.id, ana.id);
        assert_eq!(deleted.message, format!("User with ID {} deleted successfully", ana.id));

        assert!(service.list_users(Some("Ana")).await.unwrap().is_empty());

        let remaining: Vec<i32> = service
            .list_users(None)
            .await
            .unwrap()
            .iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(remaining, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let err = service().delete_user(999_999).await.unwrap_err();
        assert_eq!(err, UserError::NotFound("User with ID 999999 not found".to_string()));
    }

    #[tokio::test]
    async fn test_blank_filter_lists_everyone() {
        let service = service();
        service.create_user("Marko", "marko@example.com").await.unwrap();
        service.create_user("Ana", "ana@example.com").await.unwrap();

        assert_eq!(service.list_users(Some("   ")).await.unwrap().len(), 2);
    }
}
