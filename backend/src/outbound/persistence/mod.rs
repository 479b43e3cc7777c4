//! Diesel/SQLite persistence adapters for the repository ports.
//!
//! The database, not application code, is the authority on uniqueness and
//! referential integrity: unique indexes back the user columns, and the
//! foreign-key pragma turns dangling references into constraint errors the
//! adapters translate for the domain.

mod diesel_client_repository;
mod diesel_error_mapping;
mod diesel_job_repository;
mod diesel_order_repository;
mod diesel_user_repository;
mod models;
mod pool;
pub(crate) mod schema;

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

pub use diesel_client_repository::DieselClientRepository;
pub use diesel_job_repository::DieselJobRepository;
pub use diesel_order_repository::DieselOrderRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbConnection, DbPool, PoolConfig, PoolError};

/// Embedded schema migrations, applied at startup.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run all pending migrations on one pooled connection.
pub fn run_migrations(pool: &DbPool) -> Result<(), PoolError> {
    let mut conn = pool
        .get()
        .map_err(|error| PoolError::checkout(error.to_string()))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map(|_| ())
        .map_err(|error| PoolError::build(format!("migrations failed: {error}")))
}
