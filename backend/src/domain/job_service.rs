//! Job catalog service.
//!
//! Jobs are shared: listing and lookup are anonymous, while every mutation
//! requires an authenticated caller. "Removing" a job never touches the
//! shared row; it deletes the acting user's orders for it.

use std::sync::Arc;

use crate::domain::error::Error;
use crate::domain::error_mapping::{
    map_client_repository_error, map_job_repository_error, map_order_repository_error,
};
use crate::domain::guard::require_authenticated;
use crate::domain::job::{Job, JobDraft, JobPatch};
use crate::domain::order::{Order, OrderStatus};
use crate::domain::ports::{ClientRepository, JobRepository, NewJobRecord, OrderRepository};
use crate::domain::projections::{self, JobDetail, JobOrders};

/// Application service for the job catalog.
#[derive(Clone)]
pub struct JobService {
    jobs: Arc<dyn JobRepository>,
    orders: Arc<dyn OrderRepository>,
    clients: Arc<dyn ClientRepository>,
}

impl JobService {
    /// Create the service over its collaborating ports.
    pub fn new(
        jobs: Arc<dyn JobRepository>,
        orders: Arc<dyn OrderRepository>,
        clients: Arc<dyn ClientRepository>,
    ) -> Self {
        Self {
            jobs,
            orders,
            clients,
        }
    }

    /// The whole catalog, each job with its unscoped client view.
    pub async fn list(&self) -> Result<Vec<JobDetail>, Error> {
        let jobs = self.jobs.list().await.map_err(map_job_repository_error)?;
        let orders = self
            .orders
            .list_all()
            .await
            .map_err(map_order_repository_error)?;
        let clients = self.clients_referenced(&orders).await?;

        Ok(jobs
            .iter()
            .map(|job| projections::job_detail(job, &orders, &clients, None))
            .collect())
    }

    /// Look up one job with its unscoped client view.
    pub async fn fetch(&self, job_id: i32) -> Result<JobDetail, Error> {
        let job = self.find_existing(job_id).await?;
        self.detail(&job).await
    }

    /// Add a job to the shared catalog.
    pub async fn create(&self, acting: Option<i32>, draft: JobDraft) -> Result<JobDetail, Error> {
        require_authenticated(acting)?;
        draft.validate()?;

        let job = self
            .jobs
            .insert(NewJobRecord {
                title: draft.title,
                category: draft.category,
                description: draft.description,
                duration: draft.duration,
            })
            .await
            .map_err(map_job_repository_error)?;

        tracing::info!(job_id = job.id, "job added to catalog");
        Ok(projections::job_detail(&job, &[], &[], None))
    }

    /// Patch a catalog entry.
    pub async fn update(
        &self,
        acting: Option<i32>,
        job_id: i32,
        patch: JobPatch,
    ) -> Result<JobDetail, Error> {
        require_authenticated(acting)?;
        self.find_existing(job_id).await?;

        if patch.is_empty() {
            return Err(Error::invalid_request("No data provided"));
        }
        patch.validate()?;

        let updated = self
            .jobs
            .update(job_id, patch)
            .await
            .map_err(map_job_repository_error)?
            .ok_or_else(|| Error::not_found("Job not found"))?;

        self.detail(&updated).await
    }

    /// Remove a job from the acting user's book by deleting that user's
    /// orders for it. Blocked while any of those orders is in progress;
    /// meaningless (not found) when the user never ordered the job.
    pub async fn remove_for_user(
        &self,
        acting: Option<i32>,
        job_id: i32,
    ) -> Result<JobDetail, Error> {
        let acting = require_authenticated(acting)?;
        let job = self.find_existing(job_id).await?;

        let user_orders = self
            .orders
            .list_for_job_and_user(job_id, acting)
            .await
            .map_err(map_order_repository_error)?;
        if user_orders.is_empty() {
            return Err(Error::not_found("No orders found for this job"));
        }
        if user_orders
            .iter()
            .any(|order| order.status == OrderStatus::InProgress)
        {
            return Err(Error::conflict("Cannot remove job with active orders!"));
        }

        let snapshot = self.detail(&job).await?;
        let removed = self
            .orders
            .delete_for_job_and_user(job_id, acting)
            .await
            .map_err(map_order_repository_error)?;

        tracing::info!(job_id, user_id = acting, removed, "job removed from user");
        Ok(snapshot)
    }

    /// A job with the acting user's orders for it, each order carrying its
    /// client.
    pub async fn orders(&self, acting: Option<i32>, job_id: i32) -> Result<JobOrders, Error> {
        let acting = require_authenticated(acting)?;
        let job = self.find_existing(job_id).await?;

        let user_orders = self
            .orders
            .list_for_job_and_user(job_id, acting)
            .await
            .map_err(map_order_repository_error)?;
        let clients = self.clients_referenced(&user_orders).await?;
        let jobs = std::slice::from_ref(&job);

        let order_details = user_orders
            .iter()
            .map(|order| {
                projections::order_detail(order, &clients, jobs).ok_or_else(|| {
                    Error::storage(format!("order {} references a missing client", order.id))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(JobOrders {
            job: self.detail(&job).await?,
            orders: order_details,
        })
    }

    async fn find_existing(&self, job_id: i32) -> Result<Job, Error> {
        self.jobs
            .find_by_id(job_id)
            .await
            .map_err(map_job_repository_error)?
            .ok_or_else(|| Error::not_found("Job not found"))
    }

    /// Unscoped detail: every client that reached the job, across users.
    async fn detail(&self, job: &Job) -> Result<JobDetail, Error> {
        let orders = self
            .orders
            .list_for_job(job.id)
            .await
            .map_err(map_order_repository_error)?;
        let clients = self.clients_referenced(&orders).await?;
        Ok(projections::job_detail(job, &orders, &clients, None))
    }

    async fn clients_referenced(
        &self,
        orders: &[Order],
    ) -> Result<Vec<crate::domain::client::Client>, Error> {
        let mut client_ids: Vec<i32> = orders.iter().map(|order| order.client_id).collect();
        client_ids.sort_unstable();
        client_ids.dedup();
        self.clients
            .find_by_ids(&client_ids)
            .await
            .map_err(map_client_repository_error)
    }
}

#[cfg(test)]
#[path = "job_service_tests.rs"]
mod tests;
