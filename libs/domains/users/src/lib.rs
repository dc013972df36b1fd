//! Users Domain
//!
//! Record model, input validation, error taxonomy and persistence for the
//! users service.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │ gRPC handler │  ← apps/users/server
//! └──────┬───────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, normalization, error classification
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory and PostgreSQL)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← User, NewUser, UserFilter
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{InMemoryUserRepository, UserService};
//!
//! # async fn run() -> domain_users::UserResult<()> {
//! let service = UserService::new(InMemoryUserRepository::new());
//! let user = service.create_user("Ana Jovanović", "ana@example.com").await?;
//! service.delete_user(user.id).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use error::{StoreError, StoreResult, UserError, UserResult};
pub use models::{NewUser, User, UserFilter};
pub use postgres::PostgresUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::{DeletedUser, UserService};
