//! Derived, read-only projections over store state.
//!
//! The user↔job and client↔job many-to-many views exist only through the
//! order join. They are recomputed from current rows on every request and
//! never persisted, so there is no materialized relation to fall out of
//! sync. Each viewing context gets an explicit named shape instead of
//! conditionally included fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::domain::job::Job;
use crate::domain::order::{Order, OrderStatus};
use crate::domain::user::User;

/// Client as embedded in job views and order details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<&Client> for ClientSummary {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            name: client.name.clone(),
            email: client.email.clone(),
        }
    }
}

/// Job as embedded in client views and order details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub description: String,
    pub duration: String,
}

impl From<&Job> for JobSummary {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id,
            title: job.title.clone(),
            category: job.category.clone(),
            description: job.description.clone(),
            duration: job.duration.clone(),
        }
    }
}

/// Job with the clients that reached it through orders. The client list is
/// scoped to one user where the viewing context demands it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDetail {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub description: String,
    pub duration: String,
    pub clients: Vec<ClientSummary>,
}

/// Client with the distinct jobs reached through its orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDetail {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub address: Option<String>,
    pub notes: String,
    pub user_id: i32,
    pub jobs: Vec<JobSummary>,
}

/// Order with its client and job resolved to summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: i32,
    pub description: String,
    pub rate: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: OrderStatus,
    pub user_id: i32,
    pub client_id: i32,
    pub job_id: i32,
    pub client: ClientSummary,
    pub job: JobSummary,
}

/// Account view: the user plus every derived relation. The password digest
/// never appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub clients: Vec<ClientDetail>,
    pub orders: Vec<OrderDetail>,
    pub jobs: Vec<JobDetail>,
}

/// A client together with its orders, each order carrying its job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientOrders {
    pub client: ClientDetail,
    pub orders: Vec<OrderDetail>,
}

/// A job together with one user's orders for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOrders {
    pub job: JobDetail,
    pub orders: Vec<OrderDetail>,
}

/// Jobs a user has ordered, each annotated with the subset of that user's
/// own clients that ordered it.
///
/// Jobs appear once, in first-encounter order over `orders`; the client
/// list is deduplicated by client id. A user with no orders gets an empty
/// list.
pub fn jobs_for_user(
    user_id: i32,
    orders: &[Order],
    jobs: &[Job],
    clients: &[Client],
) -> Vec<JobDetail> {
    let mut details: Vec<JobDetail> = Vec::new();
    for order in orders.iter().filter(|o| o.user_id == user_id) {
        if details.iter().any(|d| d.id == order.job_id) {
            continue;
        }
        let Some(job) = jobs.iter().find(|j| j.id == order.job_id) else {
            continue;
        };
        let mut job_clients: Vec<ClientSummary> = Vec::new();
        for related in orders.iter().filter(|o| o.job_id == job.id) {
            let Some(client) = clients.iter().find(|c| c.id == related.client_id) else {
                continue;
            };
            if client.user_id != user_id {
                continue;
            }
            if job_clients.iter().any(|c| c.id == client.id) {
                continue;
            }
            job_clients.push(ClientSummary::from(client));
        }
        details.push(JobDetail {
            id: job.id,
            title: job.title.clone(),
            category: job.category.clone(),
            description: job.description.clone(),
            duration: job.duration.clone(),
            clients: job_clients,
        });
    }
    details
}

/// Distinct jobs reached through a client's orders.
///
/// Two summaries merge only when every emitted field matches, preserving
/// the source's whole-value deduplication.
pub fn jobs_for_client(client_id: i32, orders: &[Order], jobs: &[Job]) -> Vec<JobSummary> {
    let mut summaries: Vec<JobSummary> = Vec::new();
    for order in orders.iter().filter(|o| o.client_id == client_id) {
        let Some(job) = jobs.iter().find(|j| j.id == order.job_id) else {
            continue;
        };
        let summary = JobSummary::from(job);
        if !summaries.contains(&summary) {
            summaries.push(summary);
        }
    }
    summaries
}

/// Distinct clients reached through a job's orders, deduplicated by whole
/// summary equality. With `scope_user_id`, only that user's clients are
/// included.
pub fn clients_for_job(
    job_id: i32,
    orders: &[Order],
    clients: &[Client],
    scope_user_id: Option<i32>,
) -> Vec<ClientSummary> {
    let mut summaries: Vec<ClientSummary> = Vec::new();
    for order in orders.iter().filter(|o| o.job_id == job_id) {
        let Some(client) = clients.iter().find(|c| c.id == order.client_id) else {
            continue;
        };
        if let Some(scope) = scope_user_id
            && client.user_id != scope
        {
            continue;
        }
        let summary = ClientSummary::from(client);
        if !summaries.contains(&summary) {
            summaries.push(summary);
        }
    }
    summaries
}

/// Assemble a client detail from the client's orders and the referenced
/// jobs.
pub fn client_detail(client: &Client, orders: &[Order], jobs: &[Job]) -> ClientDetail {
    ClientDetail {
        id: client.id,
        name: client.name.clone(),
        email: client.email.clone(),
        phone: client.phone.clone(),
        company: client.company.clone(),
        address: client.address.clone(),
        notes: client.notes.clone(),
        user_id: client.user_id,
        jobs: jobs_for_client(client.id, orders, jobs),
    }
}

/// Assemble a job detail, optionally scoping the client list to one user.
pub fn job_detail(
    job: &Job,
    orders: &[Order],
    clients: &[Client],
    scope_user_id: Option<i32>,
) -> JobDetail {
    JobDetail {
        id: job.id,
        title: job.title.clone(),
        category: job.category.clone(),
        description: job.description.clone(),
        duration: job.duration.clone(),
        clients: clients_for_job(job.id, orders, clients, scope_user_id),
    }
}

/// Resolve an order's client and job into a detail view. Returns `None`
/// when either reference is absent from the supplied slices; referential
/// integrity at the store makes that an inconsistency, which callers
/// surface as a storage failure.
pub fn order_detail(order: &Order, clients: &[Client], jobs: &[Job]) -> Option<OrderDetail> {
    let client = clients.iter().find(|c| c.id == order.client_id)?;
    let job = jobs.iter().find(|j| j.id == order.job_id)?;
    Some(OrderDetail {
        id: order.id,
        description: order.description.clone(),
        rate: order.rate.clone(),
        location: order.location.clone(),
        start_date: order.start_date,
        due_date: order.due_date,
        status: order.status,
        user_id: order.user_id,
        client_id: order.client_id,
        job_id: order.job_id,
        client: ClientSummary::from(client),
        job: JobSummary::from(job),
    })
}

/// Assemble the full account view for a user.
pub fn user_profile(
    user: &User,
    clients: &[Client],
    orders: &[Order],
    jobs: &[Job],
) -> Result<UserProfile, crate::domain::error::Error> {
    let order_details = orders
        .iter()
        .map(|order| {
            order_detail(order, clients, jobs).ok_or_else(|| {
                crate::domain::error::Error::storage(format!(
                    "order {} references a missing client or job",
                    order.id
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(UserProfile {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        clients: clients
            .iter()
            .map(|client| client_detail(client, orders, jobs))
            .collect(),
        orders: order_details,
        jobs: jobs_for_user(user.id, orders, jobs, clients),
    })
}

#[cfg(test)]
mod tests;
