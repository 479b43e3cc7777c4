//! SQLite-backed `OrderRepository` implementation using Diesel.
//!
//! Every foreign key is resolved by the database at write time with the
//! foreign-key pragma on; a dangling reference surfaces as
//! `ForeignKeyViolation` rather than a silent orphan.

use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::order::Order;
use crate::domain::ports::{
    NewOrderRecord, OrderChanges, OrderRepository, OrderRepositoryError,
};

use super::diesel_error_mapping::{is_foreign_key_violation, map_run_error, violation_message};
use super::models::{NewOrderRow, OrderChangeset, OrderRow};
use super::pool::{DbPool, RunError, run_blocking};
use super::schema::orders;

/// Diesel-backed implementation of the order repository port.
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    /// Create a new repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: RunError) -> OrderRepositoryError {
    map_run_error(
        error,
        |diesel_error| {
            is_foreign_key_violation(diesel_error).then(|| {
                OrderRepositoryError::foreign_key_violation(violation_message(diesel_error))
            })
        },
        OrderRepositoryError::query,
        OrderRepositoryError::connection,
    )
}

fn to_domain(row: OrderRow) -> Result<Order, OrderRepositoryError> {
    Order::try_from(row).map_err(|error| OrderRepositoryError::query(error.to_string()))
}

fn to_domain_vec(rows: Vec<OrderRow>) -> Result<Vec<Order>, OrderRepositoryError> {
    rows.into_iter().map(to_domain).collect()
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn insert(&self, record: NewOrderRecord) -> Result<Order, OrderRepositoryError> {
        let row = NewOrderRow::from(record);
        run_blocking(&self.pool, move |conn| {
            diesel::insert_into(orders::table)
                .values(&row)
                .get_result::<OrderRow>(conn)
        })
        .await
        .map_err(map_error)
        .and_then(to_domain)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, OrderRepositoryError> {
        run_blocking(&self.pool, move |conn| {
            orders::table.find(id).first::<OrderRow>(conn).optional()
        })
        .await
        .map_err(map_error)?
        .map(to_domain)
        .transpose()
    }

    async fn list_all(&self) -> Result<Vec<Order>, OrderRepositoryError> {
        run_blocking(&self.pool, move |conn| {
            orders::table.order(orders::id.asc()).load::<OrderRow>(conn)
        })
        .await
        .map_err(map_error)
        .and_then(to_domain_vec)
    }

    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Order>, OrderRepositoryError> {
        run_blocking(&self.pool, move |conn| {
            orders::table
                .filter(orders::user_id.eq(user_id))
                .order(orders::id.asc())
                .load::<OrderRow>(conn)
        })
        .await
        .map_err(map_error)
        .and_then(to_domain_vec)
    }

    async fn list_for_client(&self, client_id: i32) -> Result<Vec<Order>, OrderRepositoryError> {
        run_blocking(&self.pool, move |conn| {
            orders::table
                .filter(orders::client_id.eq(client_id))
                .order(orders::id.asc())
                .load::<OrderRow>(conn)
        })
        .await
        .map_err(map_error)
        .and_then(to_domain_vec)
    }

    async fn list_for_job(&self, job_id: i32) -> Result<Vec<Order>, OrderRepositoryError> {
        run_blocking(&self.pool, move |conn| {
            orders::table
                .filter(orders::job_id.eq(job_id))
                .order(orders::id.asc())
                .load::<OrderRow>(conn)
        })
        .await
        .map_err(map_error)
        .and_then(to_domain_vec)
    }

    async fn list_for_job_and_user(
        &self,
        job_id: i32,
        user_id: i32,
    ) -> Result<Vec<Order>, OrderRepositoryError> {
        run_blocking(&self.pool, move |conn| {
            orders::table
                .filter(orders::job_id.eq(job_id))
                .filter(orders::user_id.eq(user_id))
                .order(orders::id.asc())
                .load::<OrderRow>(conn)
        })
        .await
        .map_err(map_error)
        .and_then(to_domain_vec)
    }

    async fn count_for_client(&self, client_id: i32) -> Result<i64, OrderRepositoryError> {
        run_blocking(&self.pool, move |conn| {
            orders::table
                .filter(orders::client_id.eq(client_id))
                .count()
                .get_result::<i64>(conn)
        })
        .await
        .map_err(map_error)
    }

    async fn update(
        &self,
        id: i32,
        changes: OrderChanges,
    ) -> Result<Option<Order>, OrderRepositoryError> {
        let changeset = OrderChangeset::from(changes);
        run_blocking(&self.pool, move |conn| {
            diesel::update(orders::table.find(id))
                .set((&changeset, orders::updated_at.eq(diesel::dsl::now)))
                .get_result::<OrderRow>(conn)
                .optional()
        })
        .await
        .map_err(map_error)?
        .map(to_domain)
        .transpose()
    }

    async fn delete(&self, id: i32) -> Result<Option<Order>, OrderRepositoryError> {
        run_blocking(&self.pool, move |conn| {
            conn.transaction(|conn| {
                let Some(row) = orders::table.find(id).first::<OrderRow>(conn).optional()?
                else {
                    return Ok(None);
                };
                diesel::delete(orders::table.find(id)).execute(conn)?;
                Ok(Some(row))
            })
        })
        .await
        .map_err(map_error)?
        .map(to_domain)
        .transpose()
    }

    async fn delete_for_job_and_user(
        &self,
        job_id: i32,
        user_id: i32,
    ) -> Result<usize, OrderRepositoryError> {
        // A single DELETE statement is atomic on its own.
        run_blocking(&self.pool, move |conn| {
            diesel::delete(
                orders::table
                    .filter(orders::job_id.eq(job_id))
                    .filter(orders::user_id.eq(user_id)),
            )
            .execute(conn)
        })
        .await
        .map_err(map_error)
    }
}
