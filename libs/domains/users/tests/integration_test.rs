//! Integration tests for Users domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - The unique constraint on email is reported as a typed conflict
//! - Filtered listing is case-insensitive and ordered by id
//! - Concurrent duplicate creates yield exactly one success

use domain_users::*;
use futures::future::join_all;
use test_utils::{TestDataBuilder, TestDatabase};

fn new_user(name: &str, email: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: email.to_string(),
    }
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
async fn test_create_returns_assigned_id() {
    let db = TestDatabase::new().await;
    let repo = PostgresUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_returns_id");

    let first = repo
        .create(new_user(&builder.name("user", "first"), &builder.email("first")))
        .await
        .unwrap();
    let second = repo
        .create(new_user(&builder.name("user", "second"), &builder.email("second")))
        .await
        .unwrap();

    assert!(first.id > 0);
    assert!(second.id > first.id);
    assert_eq!(first.email, builder.email("first"));
}

#[tokio::test]
async fn test_duplicate_email_is_unique_violation() {
    let db = TestDatabase::new().await;
    let repo = PostgresUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("duplicate_email");
    let email = builder.email("dup");

    repo.create(new_user("First", &email)).await.unwrap();
    let result = repo.create(new_user("Second", &email)).await;

    assert!(
        matches!(result, Err(StoreError::UniqueViolation(_))),
        "expected UniqueViolation, got {:?}",
        result
    );
    assert_eq!(db.count_users().await, 1);
}

#[tokio::test]
async fn test_list_filter_is_case_insensitive_and_ordered() {
    let db = TestDatabase::new().await;
    let repo = PostgresUserRepository::new(db.connection());

    repo.create(new_user("Marko Petrović", "marko@example.com")).await.unwrap();
    repo.create(new_user("Ana Jovanović", "ana@example.com")).await.unwrap();
    repo.create(new_user("Nikola Nikolić", "nikola@example.com")).await.unwrap();

    let all = repo.list(UserFilter::default()).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|w| w[0].id < w[1].id));

    let nik = repo.list(UserFilter::from_name(Some("NIK"))).await.unwrap();
    assert_eq!(nik.len(), 1);
    assert_eq!(nik[0].name, "Nikola Nikolić");

    let vic = repo.list(UserFilter::from_name(Some("vić"))).await.unwrap();
    let ids: Vec<i32> = vic.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![all[0].id, all[1].id]);
}

#[tokio::test]
async fn test_list_filter_treats_pattern_characters_literally() {
    let db = TestDatabase::new().await;
    let repo = PostgresUserRepository::new(db.connection());

    repo.create(new_user("100% Ana", "percent@example.com")).await.unwrap();
    repo.create(new_user("Ana_B", "underscore@example.com")).await.unwrap();
    repo.create(new_user("Marko", "marko@example.com")).await.unwrap();

    let percent = repo.list(UserFilter::from_name(Some("%"))).await.unwrap();
    assert_eq!(percent.len(), 1);

    let underscore = repo.list(UserFilter::from_name(Some("_"))).await.unwrap();
    assert_eq!(underscore.len(), 1);
    assert_eq!(underscore[0].name, "Ana_B");
}

#[tokio::test]
async fn test_delete_reports_rows_affected() {
    let db = TestDatabase::new().await;
    let repo = PostgresUserRepository::new(db.connection());

    let user = repo.create(new_user("Ana", "ana@example.com")).await.unwrap();

    assert!(repo.delete(user.id).await.unwrap());
    assert!(!repo.delete(user.id).await.unwrap());
    assert!(!repo.delete(999_999).await.unwrap());
    assert!(repo.list(UserFilter::default()).await.unwrap().is_empty());
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
async fn test_service_conflict_on_case_variant_email() {
    let db = TestDatabase::new().await;
    let service = UserService::new(PostgresUserRepository::new(db.connection()));

    service.create_user("Ana", "Ana@Example.com").await.unwrap();
    let err = service.create_user("Ana", "ANA@EXAMPLE.COM").await.unwrap_err();

    assert!(matches!(err, UserError::AlreadyExists(_)));
}

#[tokio::test]
async fn test_service_validation_does_not_touch_store() {
    let db = TestDatabase::new().await;
    let service = UserService::new(PostgresUserRepository::new(db.connection()));

    let err = service.create_user("Ana", "not-an-email").await.unwrap_err();
    assert_eq!(err, UserError::InvalidArgument("Invalid email format".to_string()));
    assert_eq!(db.count_users().await, 0);
}

#[tokio::test]
async fn test_service_rejects_zero_id() {
    let db = TestDatabase::new().await;
    let service = UserService::new(PostgresUserRepository::new(db.connection()));

    // Zero is taken as "id not provided"; SERIAL never hands it out
    let err = service.delete_user(0).await.unwrap_err();
    assert_eq!(err, UserError::InvalidArgument("User ID is required".to_string()));
}

#[tokio::test]
async fn test_service_negative_id_is_not_found() {
    let db = TestDatabase::new().await;
    let service = UserService::new(PostgresUserRepository::new(db.connection()));

    let err = service.delete_user(-1).await.unwrap_err();
    assert_eq!(err, UserError::NotFound("User with ID -1 not found".to_string()));
}

// ============================================================================
// Concurrency Tests
// ============================================================================

#[tokio::test]
async fn test_concurrent_duplicate_creates() {
    let db = TestDatabase::new().await;
    let service = UserService::new(PostgresUserRepository::new(db.connection()));

    let attempts = (0..10).map(|i| {
        let service = service.clone();
        async move {
            service
                .create_user(&format!("Racer {i}"), "race@example.com")
                .await
        }
    });

    let results = join_all(attempts).await;

    let created = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(UserError::AlreadyExists(_))))
        .count();

    assert_eq!(created, 1);
    assert_eq!(conflicts, 9);
    assert_eq!(db.count_users().await, 1);
}
