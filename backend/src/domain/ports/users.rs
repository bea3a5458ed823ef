//! Port abstraction for user-account persistence adapters.

use async_trait::async_trait;

use crate::domain::user::{CredentialRecord, NewUser, User};

use super::persistence::{DeleteOutcome, PersistenceError};

/// Storage surface for the user registry.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All accounts, newest first, without secret material.
    async fn list(&self) -> Result<Vec<User>, PersistenceError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, PersistenceError>;

    /// Duplicate probe used before registration.
    async fn find_by_username_or_email(
        &self,
        usuario: &str,
        correo: &str,
    ) -> Result<Option<User>, PersistenceError>;

    /// Fetch an account with its stored hash for login verification.
    async fn find_credentials_by_email(
        &self,
        correo: &str,
    ) -> Result<Option<CredentialRecord>, PersistenceError>;

    /// Insert a new account and return the stored row.
    async fn insert(&self, new_user: NewUser) -> Result<User, PersistenceError>;

    /// Delete an account.
    async fn delete(&self, id: i32) -> Result<DeleteOutcome, PersistenceError>;
}
