//! Client service: ownership-scoped CRUD with a guarded delete.

use std::sync::Arc;

use crate::domain::client::{Client, ClientDraft, ClientPatch};
use crate::domain::error::Error;
use crate::domain::error_mapping::{
    map_client_repository_error, map_job_repository_error, map_order_repository_error,
};
use crate::domain::guard::{ensure_owner, require_authenticated};
use crate::domain::ports::{ClientRepository, JobRepository, NewClientRecord, OrderRepository};
use crate::domain::projections::{self, ClientDetail, ClientOrders};

/// Application service for clients.
#[derive(Clone)]
pub struct ClientService {
    clients: Arc<dyn ClientRepository>,
    orders: Arc<dyn OrderRepository>,
    jobs: Arc<dyn JobRepository>,
}

impl ClientService {
    /// Create the service over its collaborating ports.
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        orders: Arc<dyn OrderRepository>,
        jobs: Arc<dyn JobRepository>,
    ) -> Self {
        Self {
            clients,
            orders,
            jobs,
        }
    }

    /// List the acting user's clients, each with its derived job view.
    pub async fn list(&self, acting: Option<i32>) -> Result<Vec<ClientDetail>, Error> {
        let acting = require_authenticated(acting)?;
        let clients = self
            .clients
            .list_for_user(acting)
            .await
            .map_err(map_client_repository_error)?;
        let orders = self
            .orders
            .list_for_user(acting)
            .await
            .map_err(map_order_repository_error)?;
        let jobs = self.jobs_referenced(&orders).await?;

        Ok(clients
            .iter()
            .map(|client| projections::client_detail(client, &orders, &jobs))
            .collect())
    }

    /// Create a client owned by the acting user. The owner always comes
    /// from the caller identity, never from the payload.
    pub async fn create(
        &self,
        acting: Option<i32>,
        draft: ClientDraft,
    ) -> Result<ClientDetail, Error> {
        let acting = require_authenticated(acting)?;
        draft.validate()?;

        let client = self
            .clients
            .insert(NewClientRecord {
                name: draft.name,
                email: draft.email,
                phone: draft.phone,
                company: draft.company,
                address: draft.address,
                notes: draft.notes,
                user_id: acting,
            })
            .await
            .map_err(map_client_repository_error)?;

        tracing::info!(client_id = client.id, user_id = acting, "client created");
        // A fresh client has no orders, so its job view is empty.
        Ok(projections::client_detail(&client, &[], &[]))
    }

    /// Patch a client the acting user owns.
    pub async fn update(
        &self,
        acting: Option<i32>,
        client_id: i32,
        patch: ClientPatch,
    ) -> Result<ClientDetail, Error> {
        let acting = require_authenticated(acting)?;
        let client = self.find_existing(client_id).await?;
        ensure_owner(acting, client.user_id, "client")?;

        if patch.is_empty() {
            return Err(Error::invalid_request("No data provided"));
        }
        patch.validate()?;

        let updated = self
            .clients
            .update(client_id, patch)
            .await
            .map_err(map_client_repository_error)?
            .ok_or_else(|| Error::not_found("Client not found"))?;

        self.detail(&updated).await
    }

    /// Delete a client the acting user owns. Refused while any order still
    /// references it; on success the pre-delete snapshot comes back.
    pub async fn delete(
        &self,
        acting: Option<i32>,
        client_id: i32,
    ) -> Result<ClientDetail, Error> {
        let acting = require_authenticated(acting)?;
        let client = self.find_existing(client_id).await?;
        ensure_owner(acting, client.user_id, "client")?;

        let dependents = self
            .orders
            .count_for_client(client_id)
            .await
            .map_err(map_order_repository_error)?;
        if dependents > 0 {
            return Err(Error::conflict("Cannot delete client with existing order!"));
        }

        // No orders means no derived jobs; snapshot before the row goes.
        let snapshot = projections::client_detail(&client, &[], &[]);
        self.clients
            .delete(client_id)
            .await
            .map_err(map_client_repository_error)?
            .ok_or_else(|| Error::not_found("Client not found"))?;

        tracing::info!(client_id, user_id = acting, "client deleted");
        Ok(snapshot)
    }

    /// A client with all of its orders, each order carrying its job.
    pub async fn orders(
        &self,
        acting: Option<i32>,
        client_id: i32,
    ) -> Result<ClientOrders, Error> {
        let acting = require_authenticated(acting)?;
        let client = self.find_existing(client_id).await?;
        ensure_owner(acting, client.user_id, "client")?;

        let orders = self
            .orders
            .list_for_client(client_id)
            .await
            .map_err(map_order_repository_error)?;
        let jobs = self.jobs_referenced(&orders).await?;

        let client_slice = std::slice::from_ref(&client);
        let order_details = orders
            .iter()
            .map(|order| {
                projections::order_detail(order, client_slice, &jobs).ok_or_else(|| {
                    Error::storage(format!("order {} references a missing job", order.id))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ClientOrders {
            client: projections::client_detail(&client, &orders, &jobs),
            orders: order_details,
        })
    }

    async fn find_existing(&self, client_id: i32) -> Result<Client, Error> {
        self.clients
            .find_by_id(client_id)
            .await
            .map_err(map_client_repository_error)?
            .ok_or_else(|| Error::not_found("Client not found"))
    }

    async fn detail(&self, client: &Client) -> Result<ClientDetail, Error> {
        let orders = self
            .orders
            .list_for_client(client.id)
            .await
            .map_err(map_order_repository_error)?;
        let jobs = self.jobs_referenced(&orders).await?;
        Ok(projections::client_detail(client, &orders, &jobs))
    }

    async fn jobs_referenced(
        &self,
        orders: &[crate::domain::order::Order],
    ) -> Result<Vec<crate::domain::job::Job>, Error> {
        let mut job_ids: Vec<i32> = orders.iter().map(|order| order.job_id).collect();
        job_ids.sort_unstable();
        job_ids.dedup();
        self.jobs
            .find_by_ids(&job_ids)
            .await
            .map_err(map_job_repository_error)
    }
}

#[cfg(test)]
#[path = "client_service_tests.rs"]
mod tests;
