//! Order service: creation against the caller's own clients, guarded
//! patches, and snapshot-returning deletes.

use std::sync::Arc;

use crate::domain::error::Error;
use crate::domain::error_mapping::{
    map_client_repository_error, map_job_repository_error, map_order_repository_error,
};
use crate::domain::guard::{ensure_owner, require_authenticated};
use crate::domain::order::{Order, OrderDraft, OrderPatch};
use crate::domain::ports::{
    ClientRepository, JobRepository, NewOrderRecord, OrderChanges, OrderRepository,
};
use crate::domain::projections::{self, OrderDetail};

/// Application service for orders.
#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    clients: Arc<dyn ClientRepository>,
    jobs: Arc<dyn JobRepository>,
}

impl OrderService {
    /// Create the service over its collaborating ports.
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        clients: Arc<dyn ClientRepository>,
        jobs: Arc<dyn JobRepository>,
    ) -> Self {
        Self {
            orders,
            clients,
            jobs,
        }
    }

    /// Place an order linking the acting user, one of their clients, and a
    /// catalog job. Both references are resolved before the write; a
    /// client owned by someone else is rejected outright.
    pub async fn create(
        &self,
        acting: Option<i32>,
        draft: OrderDraft,
    ) -> Result<OrderDetail, Error> {
        let acting = require_authenticated(acting)?;
        let status = draft.validate()?;

        let client = self
            .clients
            .find_by_id(draft.client_id)
            .await
            .map_err(map_client_repository_error)?
            .ok_or_else(|| {
                Error::missing_reference(format!("client {} not found", draft.client_id))
            })?;
        ensure_owner(acting, client.user_id, "client")?;

        let job = self
            .jobs
            .find_by_id(draft.job_id)
            .await
            .map_err(map_job_repository_error)?
            .ok_or_else(|| Error::missing_reference(format!("job {} not found", draft.job_id)))?;

        let order = self
            .orders
            .insert(NewOrderRecord {
                description: draft.description,
                rate: draft.rate,
                location: draft.location,
                start_date: draft.start_date,
                due_date: draft.due_date,
                status,
                user_id: acting,
                client_id: client.id,
                job_id: job.id,
            })
            .await
            .map_err(map_order_repository_error)?;

        tracing::info!(order_id = order.id, user_id = acting, "order placed");
        assemble_detail(&order, &client, &job)
    }

    /// Patch an order the acting user owns. The three references are fixed
    /// at creation and cannot be patched.
    pub async fn update(
        &self,
        acting: Option<i32>,
        order_id: i32,
        patch: OrderPatch,
    ) -> Result<OrderDetail, Error> {
        let acting = require_authenticated(acting)?;
        let order = self.find_existing(order_id).await?;
        ensure_owner(acting, order.user_id, "order")?;

        if patch.is_empty() {
            return Err(Error::invalid_request("No data provided"));
        }
        let status = patch.validate()?;

        let updated = self
            .orders
            .update(
                order_id,
                OrderChanges {
                    description: patch.description,
                    rate: patch.rate,
                    location: patch.location,
                    start_date: patch.start_date,
                    due_date: patch.due_date,
                    status,
                },
            )
            .await
            .map_err(map_order_repository_error)?
            .ok_or_else(|| Error::not_found("Order not found"))?;

        self.detail(&updated).await
    }

    /// Delete an order the acting user owns, returning its pre-delete
    /// snapshot.
    pub async fn delete(
        &self,
        acting: Option<i32>,
        order_id: i32,
    ) -> Result<OrderDetail, Error> {
        let acting = require_authenticated(acting)?;
        let order = self.find_existing(order_id).await?;
        ensure_owner(acting, order.user_id, "order")?;

        let snapshot = self.detail(&order).await?;
        self.orders
            .delete(order_id)
            .await
            .map_err(map_order_repository_error)?
            .ok_or_else(|| Error::not_found("Order not found"))?;

        tracing::info!(order_id, user_id = acting, "order deleted");
        Ok(snapshot)
    }

    async fn find_existing(&self, order_id: i32) -> Result<Order, Error> {
        self.orders
            .find_by_id(order_id)
            .await
            .map_err(map_order_repository_error)?
            .ok_or_else(|| Error::not_found("Order not found"))
    }

    async fn detail(&self, order: &Order) -> Result<OrderDetail, Error> {
        let client = self
            .clients
            .find_by_id(order.client_id)
            .await
            .map_err(map_client_repository_error)?
            .ok_or_else(|| {
                Error::storage(format!("order {} references a missing client", order.id))
            })?;
        let job = self
            .jobs
            .find_by_id(order.job_id)
            .await
            .map_err(map_job_repository_error)?
            .ok_or_else(|| {
                Error::storage(format!("order {} references a missing job", order.id))
            })?;
        assemble_detail(order, &client, &job)
    }
}

fn assemble_detail(
    order: &Order,
    client: &crate::domain::client::Client,
    job: &crate::domain::job::Job,
) -> Result<OrderDetail, Error> {
    projections::order_detail(order, std::slice::from_ref(client), std::slice::from_ref(job))
        .ok_or_else(|| {
            Error::storage(format!(
                "order {} could not be resolved into a detail view",
                order.id
            ))
        })
}

#[cfg(test)]
#[path = "order_service_tests.rs"]
mod tests;
