//! Port for user account persistence.
//!
//! Uniqueness of `username` and `email` is a store constraint: adapters
//! must surface a constraint violation as [`UserRepositoryError::Duplicate`]
//! rather than relying on callers to pre-check, since a pre-check alone is
//! racy under concurrent registration.

use std::fmt;

use async_trait::async_trait;

use crate::domain::user::User;

/// Which unique column a rejected insert collided on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserDuplicateField {
    Username,
    Email,
}

impl fmt::Display for UserDuplicateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username => f.write_str("username"),
            Self::Email => f.write_str("email"),
        }
    }
}

/// Errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
    /// A unique constraint rejected the write.
    #[error("duplicate {field}")]
    Duplicate { field: UserDuplicateField },
}

impl UserRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Validated registration record, digest already computed.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub username: String,
    pub email: String,
    pub password_digest: String,
}

/// Port for user account storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new account. Fails with [`UserRepositoryError::Duplicate`]
    /// when the username or email is already taken.
    async fn insert(&self, record: NewUserRecord) -> Result<User, UserRepositoryError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, UserRepositoryError>;

    async fn find_by_username(&self, username: &str)
    -> Result<Option<User>, UserRepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError>;

    /// Delete the account together with its clients and orders in one
    /// transaction. Jobs are shared and survive. Returns the pre-delete
    /// snapshot, or `None` when the id is unknown.
    async fn delete_cascade(&self, id: i32) -> Result<Option<User>, UserRepositoryError>;
}
