//! SQLite-backed `ClientRepository` implementation using Diesel.
//!
//! The orders table references clients without a cascade, so a delete that
//! races a concurrent order insert fails at the constraint and surfaces as
//! `DependentsExist`, keeping the service-level guard airtight.

use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::client::{Client, ClientPatch};
use crate::domain::ports::{ClientRepository, ClientRepositoryError, NewClientRecord};

use super::diesel_error_mapping::{is_foreign_key_violation, map_run_error, violation_message};
use super::models::{ClientChangeset, ClientRow, NewClientRow};
use super::pool::{DbPool, RunError, run_blocking};
use super::schema::clients;

/// Diesel-backed implementation of the client repository port.
#[derive(Clone)]
pub struct DieselClientRepository {
    pool: DbPool,
}

impl DieselClientRepository {
    /// Create a new repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(error: RunError) -> ClientRepositoryError {
    map_run_error(
        error,
        |diesel_error| {
            is_foreign_key_violation(diesel_error).then(|| {
                ClientRepositoryError::foreign_key_violation(violation_message(diesel_error))
            })
        },
        ClientRepositoryError::query,
        ClientRepositoryError::connection,
    )
}

fn map_delete_error(error: RunError) -> ClientRepositoryError {
    map_run_error(
        error,
        |diesel_error| {
            is_foreign_key_violation(diesel_error).then_some(ClientRepositoryError::DependentsExist)
        },
        ClientRepositoryError::query,
        ClientRepositoryError::connection,
    )
}

#[async_trait]
impl ClientRepository for DieselClientRepository {
    async fn insert(&self, record: NewClientRecord) -> Result<Client, ClientRepositoryError> {
        let row = NewClientRow::from(record);
        run_blocking(&self.pool, move |conn| {
            diesel::insert_into(clients::table)
                .values(&row)
                .get_result::<ClientRow>(conn)
        })
        .await
        .map(Client::from)
        .map_err(map_write_error)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Client>, ClientRepositoryError> {
        run_blocking(&self.pool, move |conn| {
            clients::table.find(id).first::<ClientRow>(conn).optional()
        })
        .await
        .map(|row| row.map(Client::from))
        .map_err(map_write_error)
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Client>, ClientRepositoryError> {
        let ids = ids.to_vec();
        run_blocking(&self.pool, move |conn| {
            clients::table
                .filter(clients::id.eq_any(ids))
                .order(clients::id.asc())
                .load::<ClientRow>(conn)
        })
        .await
        .map(|rows| rows.into_iter().map(Client::from).collect())
        .map_err(map_write_error)
    }

    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Client>, ClientRepositoryError> {
        run_blocking(&self.pool, move |conn| {
            clients::table
                .filter(clients::user_id.eq(user_id))
                .order(clients::id.asc())
                .load::<ClientRow>(conn)
        })
        .await
        .map(|rows| rows.into_iter().map(Client::from).collect())
        .map_err(map_write_error)
    }

    async fn update(
        &self,
        id: i32,
        patch: ClientPatch,
    ) -> Result<Option<Client>, ClientRepositoryError> {
        let changeset = ClientChangeset::from(patch);
        run_blocking(&self.pool, move |conn| {
            diesel::update(clients::table.find(id))
                .set((&changeset, clients::updated_at.eq(diesel::dsl::now)))
                .get_result::<ClientRow>(conn)
                .optional()
        })
        .await
        .map(|row| row.map(Client::from))
        .map_err(map_write_error)
    }

    async fn delete(&self, id: i32) -> Result<Option<Client>, ClientRepositoryError> {
        run_blocking(&self.pool, move |conn| {
            conn.transaction(|conn| {
                let Some(row) = clients::table.find(id).first::<ClientRow>(conn).optional()?
                else {
                    return Ok(None);
                };
                diesel::delete(clients::table.find(id)).execute(conn)?;
                Ok(Some(row))
            })
        })
        .await
        .map(|row| row.map(Client::from))
        .map_err(map_delete_error)
    }
}
