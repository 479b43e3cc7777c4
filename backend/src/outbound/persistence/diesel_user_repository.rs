//! SQLite-backed `UserRepository` implementation using Diesel.
//!
//! Uniqueness of username and email is enforced by the schema's unique
//! indexes; this adapter only translates the resulting constraint errors.
//! Account deletion cascades to owned clients and orders inside one
//! transaction, leaving shared jobs untouched.

use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::ports::{
    NewUserRecord, UserDuplicateField, UserRepository, UserRepositoryError,
};
use crate::domain::user::User;

use super::diesel_error_mapping::{is_unique_violation, map_run_error, violated_column};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, RunError, run_blocking};
use super::schema::{clients, orders, users};

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: RunError) -> UserRepositoryError {
    map_run_error(
        error,
        |diesel_error| {
            if !is_unique_violation(diesel_error) {
                return None;
            }
            match violated_column(diesel_error).as_deref() {
                Some("users.username") => Some(UserRepositoryError::Duplicate {
                    field: UserDuplicateField::Username,
                }),
                Some("users.email") => Some(UserRepositoryError::Duplicate {
                    field: UserDuplicateField::Email,
                }),
                _ => None,
            }
        },
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, record: NewUserRecord) -> Result<User, UserRepositoryError> {
        let row = NewUserRow::from(record);
        run_blocking(&self.pool, move |conn| {
            diesel::insert_into(users::table)
                .values(&row)
                .get_result::<UserRow>(conn)
        })
        .await
        .map(User::from)
        .map_err(map_error)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, UserRepositoryError> {
        run_blocking(&self.pool, move |conn| {
            users::table.find(id).first::<UserRow>(conn).optional()
        })
        .await
        .map(|row| row.map(User::from))
        .map_err(map_error)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        let username = username.to_owned();
        run_blocking(&self.pool, move |conn| {
            users::table
                .filter(users::username.eq(username))
                .first::<UserRow>(conn)
                .optional()
        })
        .await
        .map(|row| row.map(User::from))
        .map_err(map_error)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        let email = email.to_owned();
        run_blocking(&self.pool, move |conn| {
            users::table
                .filter(users::email.eq(email))
                .first::<UserRow>(conn)
                .optional()
        })
        .await
        .map(|row| row.map(User::from))
        .map_err(map_error)
    }

    async fn delete_cascade(&self, id: i32) -> Result<Option<User>, UserRepositoryError> {
        run_blocking(&self.pool, move |conn| {
            conn.transaction(|conn| {
                let Some(row) = users::table.find(id).first::<UserRow>(conn).optional()? else {
                    return Ok(None);
                };
                // Orders go first so the client deletes cannot trip the
                // orders.client_id reference.
                diesel::delete(orders::table.filter(orders::user_id.eq(id))).execute(conn)?;
                diesel::delete(clients::table.filter(clients::user_id.eq(id))).execute(conn)?;
                diesel::delete(users::table.find(id)).execute(conn)?;
                Ok(Some(row))
            })
        })
        .await
        .map(|row| row.map(User::from))
        .map_err(map_error)
    }
}
