//! Row structs mapping the schema to the domain entities.
//!
//! Rows carry the audit timestamps the tables maintain; the domain types do
//! not, so conversions drop them at the boundary.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::client::{Client, ClientPatch};
use crate::domain::job::{Job, JobPatch};
use crate::domain::order::{Order, OrderStatus};
use crate::domain::ports::{
    NewClientRecord, NewJobRecord, NewOrderRecord, NewUserRecord, OrderChanges,
};
use crate::domain::user::User;

use super::schema::{clients, jobs, orders, users};

#[derive(Debug, Queryable, Identifiable)]
#[diesel(table_name = users)]
pub struct UserRow {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_digest: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            password_digest: row.password_digest,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    pub username: String,
    pub email: String,
    pub password_digest: String,
}

impl From<NewUserRecord> for NewUserRow {
    fn from(record: NewUserRecord) -> Self {
        Self {
            username: record.username,
            email: record.email,
            password_digest: record.password_digest,
        }
    }
}

#[derive(Debug, Queryable, Identifiable)]
#[diesel(table_name = clients)]
pub struct ClientRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub address: Option<String>,
    pub notes: String,
    pub user_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            company: row.company,
            address: row.address,
            notes: row.notes,
            user_id: row.user_id,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = clients)]
pub struct NewClientRow {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub address: Option<String>,
    pub notes: String,
    pub user_id: i32,
}

impl From<NewClientRecord> for NewClientRow {
    fn from(record: NewClientRecord) -> Self {
        Self {
            name: record.name,
            email: record.email,
            phone: record.phone,
            company: record.company,
            address: record.address,
            notes: record.notes,
            user_id: record.user_id,
        }
    }
}

/// Partial client update; `None` leaves a column untouched, while
/// `Some(None)` clears a nullable one.
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = clients)]
pub struct ClientChangeset {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub notes: Option<String>,
}

impl From<ClientPatch> for ClientChangeset {
    fn from(patch: ClientPatch) -> Self {
        Self {
            name: patch.name,
            email: patch.email,
            phone: patch.phone,
            company: patch.company,
            address: patch.address,
            notes: patch.notes,
        }
    }
}

#[derive(Debug, Queryable, Identifiable)]
#[diesel(table_name = jobs)]
pub struct JobRow {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub description: String,
    pub duration: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            category: row.category,
            description: row.description,
            duration: row.duration,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = jobs)]
pub struct NewJobRow {
    pub title: String,
    pub category: String,
    pub description: String,
    pub duration: String,
}

impl From<NewJobRecord> for NewJobRow {
    fn from(record: NewJobRecord) -> Self {
        Self {
            title: record.title,
            category: record.category,
            description: record.description,
            duration: record.duration,
        }
    }
}

#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = jobs)]
pub struct JobChangeset {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
}

impl From<JobPatch> for JobChangeset {
    fn from(patch: JobPatch) -> Self {
        Self {
            title: patch.title,
            category: patch.category,
            description: patch.description,
            duration: patch.duration,
        }
    }
}

#[derive(Debug, Queryable, Identifiable)]
#[diesel(table_name = orders)]
pub struct OrderRow {
    pub id: i32,
    pub description: String,
    pub rate: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: String,
    pub user_id: i32,
    pub client_id: i32,
    pub job_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Raised when a stored status no longer parses. Only reachable if the
/// database was edited outside the application.
#[derive(Debug, thiserror::Error)]
#[error("unrecognized stored status {value:?} on order {id}")]
pub struct CorruptStatus {
    pub id: i32,
    pub value: String,
}

impl TryFrom<OrderRow> for Order {
    type Error = CorruptStatus;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = OrderStatus::parse(&row.status).ok_or_else(|| CorruptStatus {
            id: row.id,
            value: row.status.clone(),
        })?;
        Ok(Self {
            id: row.id,
            description: row.description,
            rate: row.rate,
            location: row.location,
            start_date: row.start_date,
            due_date: row.due_date,
            status,
            user_id: row.user_id,
            client_id: row.client_id,
            job_id: row.job_id,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub description: String,
    pub rate: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: String,
    pub user_id: i32,
    pub client_id: i32,
    pub job_id: i32,
}

impl From<NewOrderRecord> for NewOrderRow {
    fn from(record: NewOrderRecord) -> Self {
        Self {
            description: record.description,
            rate: record.rate,
            location: record.location,
            start_date: record.start_date,
            due_date: record.due_date,
            status: record.status.as_str().to_owned(),
            user_id: record.user_id,
            client_id: record.client_id,
            job_id: record.job_id,
        }
    }
}

#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = orders)]
pub struct OrderChangeset {
    pub description: Option<String>,
    pub rate: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<String>,
}

impl From<OrderChanges> for OrderChangeset {
    fn from(changes: OrderChanges) -> Self {
        Self {
            description: changes.description,
            rate: changes.rate,
            location: changes.location,
            start_date: changes.start_date,
            due_date: changes.due_date,
            status: changes.status.map(|status| status.as_str().to_owned()),
        }
    }
}
