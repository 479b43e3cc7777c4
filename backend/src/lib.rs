//! Multi-tenant engagement tracking core.
//!
//! Freelancer accounts own clients and orders; jobs form a shared catalog,
//! and an order is the sole join between a user, one of their clients, and
//! a job. The crate exposes transport-agnostic services (`domain`) over
//! Diesel/SQLite adapters (`outbound`); HTTP mapping, session issuance,
//! and seeding live outside this crate and pass the acting caller's
//! identity in explicitly.

pub mod domain;
pub mod outbound;

#[cfg(feature = "test-support")]
pub mod test_support;
