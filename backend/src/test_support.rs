//! Shared helpers for integration tests.
//!
//! Only compiled with the `test-support` feature; the dev-dependency on
//! this crate enables it so integration tests get a fully wired service
//! stack over a throwaway database.

use std::sync::Arc;

use diesel::prelude::*;
use tempfile::TempDir;

use crate::domain::{ClientService, JobService, OrderService, UserService};
use crate::outbound::auth::BcryptPasswordHasher;
use crate::outbound::persistence::{
    DbPool, DieselClientRepository, DieselJobRepository, DieselOrderRepository,
    DieselUserRepository, PoolConfig, run_migrations, schema,
};

/// Row counts across the four tables, for lifecycle assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCounts {
    pub users: i64,
    pub clients: i64,
    pub jobs: i64,
    pub orders: i64,
}

/// A wired service stack over a temporary SQLite database.
pub struct TestApp {
    pub users: UserService,
    pub clients: ClientService,
    pub jobs: JobService,
    pub orders: OrderService,
    pub pool: DbPool,
    // Held so the database file outlives the pool.
    _data_dir: TempDir,
}

impl TestApp {
    /// Stand up a fresh database with migrations applied and services
    /// wired against it.
    ///
    /// # Panics
    /// Panics when the database cannot be created; no test can proceed
    /// without it.
    pub fn bootstrap() -> Self {
        // Service logs surface in failing tests when RUST_LOG is set.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();

        let data_dir = tempfile::tempdir().expect("create temp dir");
        let db_path = data_dir.path().join("core.sqlite3");
        let pool = PoolConfig::new(db_path.to_string_lossy())
            .with_max_size(2)
            .build()
            .expect("build pool");
        run_migrations(&pool).expect("apply migrations");

        let user_repo = Arc::new(DieselUserRepository::new(pool.clone()));
        let client_repo = Arc::new(DieselClientRepository::new(pool.clone()));
        let job_repo = Arc::new(DieselJobRepository::new(pool.clone()));
        let order_repo = Arc::new(DieselOrderRepository::new(pool.clone()));
        // Minimum bcrypt cost: login-heavy suites should not spend their
        // runtime on key stretching.
        let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));

        Self {
            users: UserService::new(
                user_repo.clone(),
                client_repo.clone(),
                job_repo.clone(),
                order_repo.clone(),
                hasher,
            ),
            clients: ClientService::new(
                client_repo.clone(),
                order_repo.clone(),
                job_repo.clone(),
            ),
            jobs: JobService::new(job_repo.clone(), order_repo.clone(), client_repo.clone()),
            orders: OrderService::new(order_repo, client_repo, job_repo),
            pool,
            _data_dir: data_dir,
        }
    }

    /// Count the rows in every table.
    ///
    /// # Panics
    /// Panics when the database cannot be queried.
    pub fn table_counts(&self) -> TableCounts {
        let mut conn = self.pool.get().expect("checkout connection");
        TableCounts {
            users: schema::users::table
                .count()
                .get_result(&mut conn)
                .expect("count users"),
            clients: schema::clients::table
                .count()
                .get_result(&mut conn)
                .expect("count clients"),
            jobs: schema::jobs::table
                .count()
                .get_result(&mut conn)
                .expect("count jobs"),
            orders: schema::orders::table
                .count()
                .get_result(&mut conn)
                .expect("count orders"),
        }
    }
}
