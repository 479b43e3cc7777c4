//! Port for client persistence.

use async_trait::async_trait;

use crate::domain::client::{Client, ClientPatch};

/// Errors raised by client repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientRepositoryError {
    /// Repository connection could not be established.
    #[error("client repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("client repository query failed: {message}")]
    Query { message: String },
    /// The owning user no longer exists.
    #[error("client references a missing owner: {message}")]
    ForeignKeyViolation { message: String },
    /// Orders still reference the client, so the delete was refused.
    #[error("client still has orders")]
    DependentsExist,
}

impl ClientRepositoryError {
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

    /// Create a foreign-key violation with the given message.
    pub fn foreign_key_violation(message: impl Into<String>) -> Self {
        Self::ForeignKeyViolation {
            message: message.into(),
        }
    }
}

/// Validated creation record with the owner resolved by the service.
#[derive(Debug, Clone)]
pub struct NewClientRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub address: Option<String>,
    pub notes: String,
    pub user_id: i32,
}

/// Port for client storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn insert(&self, record: NewClientRecord) -> Result<Client, ClientRepositoryError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Client>, ClientRepositoryError>;

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Client>, ClientRepositoryError>;

    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Client>, ClientRepositoryError>;

    /// Apply a validated patch; absent fields stay untouched. Returns the
    /// updated row, or `None` when the id is unknown.
    async fn update(
        &self,
        id: i32,
        patch: ClientPatch,
    ) -> Result<Option<Client>, ClientRepositoryError>;

    /// Delete the client. Returns the pre-delete snapshot, or `None` when
    /// the id is unknown. Fails with
    /// [`ClientRepositoryError::DependentsExist`] if orders still point at
    /// it, backing the service-level guard against concurrent order
    /// creation.
    async fn delete(&self, id: i32) -> Result<Option<Client>, ClientRepositoryError>;
}
