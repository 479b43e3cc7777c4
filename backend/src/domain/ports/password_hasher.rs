//! Opaque password-hashing capability.
//!
//! The core never sees how digests are produced; it only exchanges a raw
//! password for a digest at registration and asks for a yes/no at login.

/// Errors raised by password hasher adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHasherError {
    /// Hashing or verification could not be performed.
    #[error("password hashing failed: {message}")]
    Hash { message: String },
}

impl PasswordHasherError {
    /// Create a hashing error with the given message.
    pub fn hash(message: impl Into<String>) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }
}

/// Port for the password-hashing primitive.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce an opaque digest for storage.
    fn hash(&self, password: &str) -> Result<String, PasswordHasherError>;

    /// Check a candidate password against a stored digest.
    fn verify(&self, password: &str, digest: &str) -> Result<bool, PasswordHasherError>;
}
