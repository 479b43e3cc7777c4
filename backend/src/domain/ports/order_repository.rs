//! Port for order persistence.
//!
//! Orders are the only join between users, clients, and jobs, so this port
//! carries the scoped listings every derived view is built from.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::order::{Order, OrderStatus};

/// Errors raised by order repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderRepositoryError {
    /// Repository connection could not be established.
    #[error("order repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("order repository query failed: {message}")]
    Query { message: String },
    /// A referenced user, client, or job vanished before the write landed.
    #[error("order references a missing row: {message}")]
    ForeignKeyViolation { message: String },
}

impl OrderRepositoryError {
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

/// Validated creation record: status already parsed, owner resolved.
#[derive(Debug, Clone)]
pub struct NewOrderRecord {
    pub description: String,
    pub rate: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: OrderStatus,
    pub user_id: i32,
    pub client_id: i32,
    pub job_id: i32,
}

/// Validated partial update; foreign keys are immutable and therefore not
/// representable here.
#[derive(Debug, Clone, Default)]
pub struct OrderChanges {
    pub description: Option<String>,
    pub rate: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<OrderStatus>,
}

/// Port for order storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a new order. The store resolves all three references at
    /// write time; a dangling one fails with
    /// [`OrderRepositoryError::ForeignKeyViolation`].
    async fn insert(&self, record: NewOrderRecord) -> Result<Order, OrderRepositoryError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, OrderRepositoryError>;

    async fn list_all(&self) -> Result<Vec<Order>, OrderRepositoryError>;

    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Order>, OrderRepositoryError>;

    async fn list_for_client(&self, client_id: i32) -> Result<Vec<Order>, OrderRepositoryError>;

    async fn list_for_job(&self, job_id: i32) -> Result<Vec<Order>, OrderRepositoryError>;

    async fn list_for_job_and_user(
        &self,
        job_id: i32,
        user_id: i32,
    ) -> Result<Vec<Order>, OrderRepositoryError>;

    async fn count_for_client(&self, client_id: i32) -> Result<i64, OrderRepositoryError>;

    /// Apply validated changes; absent fields stay untouched. Returns the
    /// updated row, or `None` when the id is unknown.
    async fn update(
        &self,
        id: i32,
        changes: OrderChanges,
    ) -> Result<Option<Order>, OrderRepositoryError>;

    /// Delete one order, returning its pre-delete snapshot.
    async fn delete(&self, id: i32) -> Result<Option<Order>, OrderRepositoryError>;

    /// Delete every order a user placed for a job, in one transaction.
    /// Returns how many rows went away.
    async fn delete_for_job_and_user(
        &self,
        job_id: i32,
        user_id: i32,
    ) -> Result<usize, OrderRepositoryError>;
}
