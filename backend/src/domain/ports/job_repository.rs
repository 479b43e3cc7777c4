//! Port for job catalog persistence.

use async_trait::async_trait;

use crate::domain::job::{Job, JobPatch};

/// Errors raised by job repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobRepositoryError {
    /// Repository connection could not be established.
    #[error("job repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("job repository query failed: {message}")]
    Query { message: String },
}

impl JobRepositoryError {
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

/// Validated creation record.
#[derive(Debug, Clone)]
pub struct NewJobRecord {
    pub title: String,
    pub category: String,
    pub description: String,
    pub duration: String,
}

/// Port for job catalog storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn insert(&self, record: NewJobRecord) -> Result<Job, JobRepositoryError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Job>, JobRepositoryError>;

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Job>, JobRepositoryError>;

    async fn list(&self) -> Result<Vec<Job>, JobRepositoryError>;

    /// Apply a validated patch; absent fields stay untouched. Returns the
    /// updated row, or `None` when the id is unknown.
    async fn update(&self, id: i32, patch: JobPatch) -> Result<Option<Job>, JobRepositoryError>;

    /// Remove the job and every order referencing it in one transaction
    /// (delete-orphan). Returns the pre-delete snapshot, or `None` when the
    /// id is unknown.
    async fn delete_with_orders(&self, id: i32) -> Result<Option<Job>, JobRepositoryError>;
}
