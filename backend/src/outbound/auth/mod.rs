//! bcrypt adapter for the password-hashing capability port.

use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Password hasher backed by bcrypt.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Hasher at bcrypt's default cost.
    pub fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Hasher at an explicit cost. Test fixtures use the minimum cost so
    /// login-heavy suites stay fast.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHasherError> {
        bcrypt::hash(password, self.cost)
            .map_err(|error| PasswordHasherError::hash(error.to_string()))
    }

    fn verify(&self, password: &str, digest: &str) -> Result<bool, PasswordHasherError> {
        bcrypt::verify(password, digest)
            .map_err(|error| PasswordHasherError::hash(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // bcrypt's minimum cost; keeps the suite fast.
    const TEST_COST: u32 = 4;

    #[test]
    fn digests_verify_and_reject() {
        let hasher = BcryptPasswordHasher::with_cost(TEST_COST);
        let digest = hasher.hash("correct horse").expect("hashing succeeds");

        assert!(hasher.verify("correct horse", &digest).expect("verify runs"));
        assert!(!hasher.verify("wrong", &digest).expect("verify runs"));
    }

    #[test]
    fn digests_are_salted() {
        let hasher = BcryptPasswordHasher::with_cost(TEST_COST);
        let first = hasher.hash("same input").expect("hashing succeeds");
        let second = hasher.hash("same input").expect("hashing succeeds");
        assert_ne!(first, second);
    }
}
