//! User account service: registration, authentication, lookup, deletion.
//!
//! Duplicate checks here are a fast path only; the store's unique
//! constraints remain authoritative, so two concurrent registrations with
//! the same email resolve in the database with exactly one winner.

use std::sync::Arc;

use crate::domain::error::Error;
use crate::domain::error_mapping::{
    map_client_repository_error, map_job_repository_error, map_order_repository_error,
    map_password_hasher_error, map_user_repository_error,
};
use crate::domain::guard::{ensure_owner, require_authenticated};
use crate::domain::ports::{
    ClientRepository, JobRepository, NewUserRecord, OrderRepository, PasswordHasher,
    UserRepository,
};
use crate::domain::projections::{self, UserProfile};
use crate::domain::user::{NewUser, User};

/// Application service for user accounts.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    clients: Arc<dyn ClientRepository>,
    jobs: Arc<dyn JobRepository>,
    orders: Arc<dyn OrderRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    /// Create the service over its collaborating ports.
    pub fn new(
        users: Arc<dyn UserRepository>,
        clients: Arc<dyn ClientRepository>,
        jobs: Arc<dyn JobRepository>,
        orders: Arc<dyn OrderRepository>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            users,
            clients,
            jobs,
            orders,
            hasher,
        }
    }

    /// Register a new account and return its profile.
    pub async fn register(&self, new_user: NewUser) -> Result<UserProfile, Error> {
        new_user.validate()?;

        if self
            .users
            .find_by_email(&new_user.email)
            .await
            .map_err(map_user_repository_error)?
            .is_some()
        {
            return Err(Error::conflict("Email already exists"));
        }
        if self
            .users
            .find_by_username(&new_user.username)
            .await
            .map_err(map_user_repository_error)?
            .is_some()
        {
            return Err(Error::conflict("Username already exists"));
        }

        let digest = self
            .hasher
            .hash(&new_user.password)
            .map_err(map_password_hasher_error)?;

        let user = self
            .users
            .insert(NewUserRecord {
                username: new_user.username,
                email: new_user.email,
                password_digest: digest,
            })
            .await
            .map_err(map_user_repository_error)?;

        tracing::info!(user_id = user.id, username = %user.username, "user registered");
        self.profile(&user).await
    }

    /// Verify credentials and return the profile on success.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserProfile, Error> {
        let Some(user) = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_user_repository_error)?
        else {
            return Err(Error::unauthorized("Invalid credentials"));
        };

        let matches = self
            .hasher
            .verify(password, &user.password_digest)
            .map_err(map_password_hasher_error)?;
        if !matches {
            tracing::debug!(username, "password mismatch");
            return Err(Error::unauthorized("Invalid credentials"));
        }

        self.profile(&user).await
    }

    /// Look up a profile by id.
    pub async fn fetch(&self, user_id: i32) -> Result<UserProfile, Error> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))?;
        self.profile(&user).await
    }

    /// Delete an account together with its clients and orders. Shared jobs
    /// survive. Only the account owner may do this.
    pub async fn delete(
        &self,
        acting: Option<i32>,
        user_id: i32,
    ) -> Result<UserProfile, Error> {
        let acting = require_authenticated(acting)?;
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))?;
        ensure_owner(acting, user.id, "user")?;

        let snapshot = self.profile(&user).await?;
        self.users
            .delete_cascade(user.id)
            .await
            .map_err(map_user_repository_error)?;
        tracing::info!(user_id, "user deleted with owned clients and orders");
        Ok(snapshot)
    }

    async fn profile(&self, user: &User) -> Result<UserProfile, Error> {
        let clients = self
            .clients
            .list_for_user(user.id)
            .await
            .map_err(map_client_repository_error)?;
        let orders = self
            .orders
            .list_for_user(user.id)
            .await
            .map_err(map_order_repository_error)?;

        let mut job_ids: Vec<i32> = orders.iter().map(|order| order.job_id).collect();
        job_ids.sort_unstable();
        job_ids.dedup();
        let jobs = self
            .jobs
            .find_by_ids(&job_ids)
            .await
            .map_err(map_job_repository_error)?;

        projections::user_profile(user, &clients, &orders, &jobs)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
