//! SQLite-backed `JobRepository` implementation using Diesel.
//!
//! Deleting a catalog entry is delete-orphan: the job's orders go away in
//! the same transaction, matching the ownership the schema declares.

use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::job::{Job, JobPatch};
use crate::domain::ports::{JobRepository, JobRepositoryError, NewJobRecord};

use super::diesel_error_mapping::map_run_error;
use super::models::{JobChangeset, JobRow, NewJobRow};
use super::pool::{DbPool, RunError, run_blocking};
use super::schema::{jobs, orders};

/// Diesel-backed implementation of the job repository port.
#[derive(Clone)]
pub struct DieselJobRepository {
    pool: DbPool,
}

impl DieselJobRepository {
    /// Create a new repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: RunError) -> JobRepositoryError {
    map_run_error(
        error,
        |_| None,
        JobRepositoryError::query,
        JobRepositoryError::connection,
    )
}

#[async_trait]
impl JobRepository for DieselJobRepository {
    async fn insert(&self, record: NewJobRecord) -> Result<Job, JobRepositoryError> {
        let row = NewJobRow::from(record);
        run_blocking(&self.pool, move |conn| {
            diesel::insert_into(jobs::table)
                .values(&row)
                .get_result::<JobRow>(conn)
        })
        .await
        .map(Job::from)
        .map_err(map_error)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Job>, JobRepositoryError> {
        run_blocking(&self.pool, move |conn| {
            jobs::table.find(id).first::<JobRow>(conn).optional()
        })
        .await
        .map(|row| row.map(Job::from))
        .map_err(map_error)
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Job>, JobRepositoryError> {
        let ids = ids.to_vec();
        run_blocking(&self.pool, move |conn| {
            jobs::table
                .filter(jobs::id.eq_any(ids))
                .order(jobs::id.asc())
                .load::<JobRow>(conn)
        })
        .await
        .map(|rows| rows.into_iter().map(Job::from).collect())
        .map_err(map_error)
    }

    async fn list(&self) -> Result<Vec<Job>, JobRepositoryError> {
        run_blocking(&self.pool, move |conn| {
            jobs::table.order(jobs::id.asc()).load::<JobRow>(conn)
        })
        .await
        .map(|rows| rows.into_iter().map(Job::from).collect())
        .map_err(map_error)
    }

    async fn update(&self, id: i32, patch: JobPatch) -> Result<Option<Job>, JobRepositoryError> {
        let changeset = JobChangeset::from(patch);
        run_blocking(&self.pool, move |conn| {
            diesel::update(jobs::table.find(id))
                .set((&changeset, jobs::updated_at.eq(diesel::dsl::now)))
                .get_result::<JobRow>(conn)
                .optional()
        })
        .await
        .map(|row| row.map(Job::from))
        .map_err(map_error)
    }

    async fn delete_with_orders(&self, id: i32) -> Result<Option<Job>, JobRepositoryError> {
        run_blocking(&self.pool, move |conn| {
            conn.transaction(|conn| {
                let Some(row) = jobs::table.find(id).first::<JobRow>(conn).optional()? else {
                    return Ok(None);
                };
                diesel::delete(orders::table.filter(orders::job_id.eq(id))).execute(conn)?;
                diesel::delete(jobs::table.find(id)).execute(conn)?;
                Ok(Some(row))
            })
        })
        .await
        .map(|row| row.map(Job::from))
        .map_err(map_error)
    }
}
