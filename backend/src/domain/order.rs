//! Order entity: the sole join between a user, one of their clients, and a
//! catalog job.
//!
//! All three foreign keys are fixed at creation; a patch can touch the
//! descriptive fields and the status, nothing else.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::error::Error;
use crate::domain::validation::Violations;

/// Engagement lifecycle state.
///
/// Input is accepted case-insensitively; the canonical lowercase form is
/// what gets stored and serialized, so downstream equality never depends on
/// the caller's casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "canceled")]
    Canceled,
}

impl OrderStatus {
    /// Canonical lowercase form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }

    /// Parse caller input, ignoring case. Returns `None` for unknown states.
    pub fn parse(input: &str) -> Option<Self> {
        match input.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "in progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "canceled" => Some(Self::Canceled),
            _ => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted order record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
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
}

/// Creation payload. `user_id` comes from the acting caller, so only the
/// client and job references appear here.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderDraft {
    pub description: String,
    pub rate: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    /// Raw status text; absent means `pending`.
    #[serde(default)]
    pub status: Option<String>,
    pub client_id: i32,
    pub job_id: i32,
}

impl OrderDraft {
    /// Full-mode validation. On success returns the resolved status.
    pub fn validate(&self) -> Result<OrderStatus, Error> {
        let mut violations = Violations::new();
        validate_description(&self.description, &mut violations);
        validate_rate(&self.rate, &mut violations);
        validate_location(&self.location, &mut violations);
        let status = resolve_status(self.status.as_deref(), &mut violations);
        violations.into_result()?;
        Ok(status.unwrap_or(OrderStatus::Pending))
    }
}

/// Partial update. Foreign keys are deliberately absent: an order can never
/// be re-pointed at a different user, client, or job.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub description: Option<String>,
    pub rate: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<String>,
}

impl OrderPatch {
    /// Partial-mode validation. On success returns the parsed status when
    /// one was supplied.
    pub fn validate(&self) -> Result<Option<OrderStatus>, Error> {
        let mut violations = Violations::new();
        if let Some(description) = &self.description {
            validate_description(description, &mut violations);
        }
        if let Some(rate) = &self.rate {
            validate_rate(rate, &mut violations);
        }
        if let Some(location) = &self.location {
            validate_location(location, &mut violations);
        }
        let status = resolve_status(self.status.as_deref(), &mut violations);
        violations.into_result()?;
        Ok(status)
    }

    /// True when no field is supplied at all.
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.rate.is_none()
            && self.location.is_none()
            && self.start_date.is_none()
            && self.due_date.is_none()
            && self.status.is_none()
    }
}

fn resolve_status(input: Option<&str>, violations: &mut Violations) -> Option<OrderStatus> {
    let raw = input?;
    let parsed = OrderStatus::parse(raw);
    if parsed.is_none() {
        violations.push(
            "status",
            "Status must be one of: pending, in progress, completed, canceled",
        );
    }
    parsed
}

fn validate_description(value: &str, violations: &mut Violations) {
    if value.trim().chars().count() < 5 {
        violations.push(
            "description",
            "Order description must be at least 5 characters long",
        );
    }
}

fn validate_rate(value: &str, violations: &mut Violations) {
    if value.chars().count() < 10 {
        violations.push("rate", "Job rate must be at least 10 characters long");
    }
}

fn validate_location(value: &str, violations: &mut Violations) {
    if value.trim().chars().count() < 10 {
        violations.push(
            "location",
            "Order location must be at least 10 characters long",
        );
    }
}
