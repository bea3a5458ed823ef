//! Bcrypt password hashing adapter.

use crate::domain::ports::{IdentityError, PasswordHasher};

/// Salted bcrypt hashing with a configurable work factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl BcryptPasswordHasher {
    /// Use a non-default work factor. Tests lower it to stay fast.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, raw: &str) -> Result<String, IdentityError> {
        bcrypt::hash(raw, self.cost).map_err(|err| IdentityError::failure(err.to_string()))
    }

    fn verify(&self, raw: &str, hash: &str) -> Result<bool, IdentityError> {
        bcrypt::verify(raw, hash).map_err(|err| IdentityError::failure(err.to_string()))
    }
}
