//! Ports for the identity-guard primitives.
//!
//! Hashing and token signing are external collaborators; the domain only
//! depends on these contracts.

use crate::domain::identity::Claims;
use crate::domain::user::User;

use super::macros::define_port_error;

define_port_error! {
    /// Failures raised by identity primitives.
    pub enum IdentityError {
        /// Token missing required structure, expired, or signed with
        /// another key. Never says which.
        InvalidToken {} => "token rejected",
        /// The hashing or signing primitive itself failed.
        Failure { message: String } => "identity primitive failed: {message}",
    }
}

/// Salted password hashing contract.
pub trait PasswordHasher: Send + Sync {
    /// Hash a raw password for storage.
    fn hash(&self, raw: &str) -> Result<String, IdentityError>;

    /// Check a raw password against a stored hash.
    fn verify(&self, raw: &str, hash: &str) -> Result<bool, IdentityError>;
}

/// Signed-token contract: issue on login, verify on every request.
pub trait TokenCodec: Send + Sync {
    /// Issue a token embedding the account's identity claims.
    fn issue(&self, user: &User) -> Result<String, IdentityError>;

    /// Validate signature and expiry, returning the embedded claims.
    fn verify(&self, token: &str) -> Result<Claims, IdentityError>;
}
