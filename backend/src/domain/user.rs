//! User account entity and registration payload.
//!
//! The password digest is opaque to the core: it is produced and checked by
//! the [`PasswordHasher`](crate::domain::ports::PasswordHasher) capability
//! and never appears in any projection.

use std::fmt;

use crate::domain::error::Error;
use crate::domain::validation::Violations;

/// Persisted user account.
///
/// ## Invariants
/// - `username` and `email` are globally unique, enforced by the store.
/// - `password_digest` is never serialized.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_digest: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_digest", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Registration payload. The raw password is validated here and exchanged
/// for a digest before anything reaches the store.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    /// Full-mode validation: every field must be present and acceptable.
    pub fn validate(&self) -> Result<(), Error> {
        let mut violations = Violations::new();
        validate_username(&self.username, &mut violations);
        validate_email(&self.email, &mut violations);
        if self.password.chars().count() < 8 {
            violations.push("password", "Password must be at least 8 characters long");
        }
        violations.into_result()
    }
}

fn validate_username(value: &str, violations: &mut Violations) {
    if value.chars().count() < 2 {
        violations.push("username", "Username must be at least 2 characters long");
        return;
    }
    if !value.chars().all(|c| c.is_alphanumeric() || c.is_whitespace()) {
        violations.push(
            "username",
            "Username must contain only letters, numbers, and spaces",
        );
    }
}

// Account emails only need to look like an address; the strict pattern is
// reserved for client records.
fn validate_email(value: &str, violations: &mut Violations) {
    if !value.contains('@') || !value.contains('.') {
        violations.push("email", "Invalid email format");
        return;
    }
    if value.chars().count() < 5 {
        violations.push("email", "Email must be at least 5 characters long");
    }
}
