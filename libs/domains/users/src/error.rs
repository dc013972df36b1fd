use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use tonic::{Code, Status};

/// Errors surfaced to callers of the users service
///
/// The set is closed: every store or transport problem is classified into
/// one of these before it leaves the service. The payload is the exact text
/// sent to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    /// gRPC status code for this error kind
    pub fn code(&self) -> Code {
        match self {
            UserError::InvalidArgument(_) => Code::InvalidArgument,
            UserError::AlreadyExists(_) => Code::AlreadyExists,
            UserError::NotFound(_) => Code::NotFound,
            UserError::Internal(_) => Code::Internal,
        }
    }
}

impl From<UserError> for Status {
    fn from(err: UserError) -> Self {
        let code = err.code();
        match err {
            UserError::InvalidArgument(msg)
            | UserError::AlreadyExists(msg)
            | UserError::NotFound(msg)
            | UserError::Internal(msg) => Status::new(code, msg),
        }
    }
}

/// Outcome of a failed store operation
#[derive(Debug, Error)]
pub enum StoreError {
    /// The insert hit the unique constraint on email
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("store error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Classify a SeaORM error using the driver's SQL error kind
impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => StoreError::UniqueViolation(detail),
            _ => StoreError::Backend(err.to_string()),
        }
    }
}
