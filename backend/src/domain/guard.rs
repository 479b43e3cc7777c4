//! Pre-mutation authorization checks shared by the services.
//!
//! Ordering matters and is fixed across the surface: missing entities are
//! reported before ownership failures, and ownership failures before
//! dependent-state conflicts.

use crate::domain::error::Error;

/// Resolve the acting caller or fail with `Unauthorized`.
pub(crate) fn require_authenticated(acting: Option<i32>) -> Result<i32, Error> {
    acting.ok_or_else(|| Error::unauthorized("Not authenticated"))
}

/// Require the acting caller to own the entity, or fail with `Forbidden`.
pub(crate) fn ensure_owner(acting: i32, owner: i32, entity: &str) -> Result<(), Error> {
    if acting == owner {
        Ok(())
    } else {
        Err(Error::forbidden(format!("Unauthorized access to {entity}")))
    }
}
