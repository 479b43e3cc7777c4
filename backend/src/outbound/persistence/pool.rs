//! Connection pool for Diesel SQLite connections.
//!
//! Wraps Diesel's `r2d2` integration. Every checked-out connection gets
//! foreign-key enforcement and a busy timeout applied, so the schema's
//! referential constraints hold on every code path and concurrent writers
//! queue instead of failing immediately.

use std::time::Duration;

use diesel::SqliteConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};

/// Pool of SQLite connections shared by the persistence adapters.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// One checked-out connection.
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Configuration for the database connection pool.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Create a new configuration for the given database path or URL.
    ///
    /// Defaults: 10 connections, 30 second checkout timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 10,
            connection_timeout: Duration::from_secs(30),
        }
    }

    /// Override the maximum pool size.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Override the checkout timeout.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Build the pool.
    pub fn build(self) -> Result<DbPool, PoolError> {
        let manager = ConnectionManager::<SqliteConnection>::new(self.database_url);
        Pool::builder()
            .max_size(self.max_size)
            .connection_timeout(self.connection_timeout)
            .connection_customizer(Box::new(SqlitePragmas))
            .build(manager)
            .map_err(|error| PoolError::build(error.to_string()))
    }
}

#[derive(Debug, Clone, Copy)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Failure surface of [`run_blocking`]: either the pool (checkout/join) or
/// the query itself.
#[derive(Debug)]
pub(crate) enum RunError {
    Pool(PoolError),
    Query(diesel::result::Error),
}

/// Run a blocking Diesel operation on the Tokio blocking pool.
///
/// Diesel's SQLite backend is synchronous, so adapters hop onto a blocking
/// thread for every query instead of stalling the async executor.
pub(crate) async fn run_blocking<T, F>(pool: &DbPool, op: F) -> Result<T, RunError>
where
    F: FnOnce(&mut SqliteConnection) -> Result<T, diesel::result::Error> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        let mut conn = pool
            .get()
            .map_err(|error| RunError::Pool(PoolError::checkout(error.to_string())))?;
        op(&mut conn).map_err(RunError::Query)
    })
    .await;

    match outcome {
        Ok(result) => result,
        Err(join_error) => Err(RunError::Pool(PoolError::checkout(format!(
            "blocking task failed: {join_error}"
        )))),
    }
}
