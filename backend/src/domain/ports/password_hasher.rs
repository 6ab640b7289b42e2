//! Port for one-way password hashing.

use async_trait::async_trait;

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHasherError {
        /// The hash could not be computed.
        Hashing => "password hashing failed: {message}",
        /// A stored hash could not be parsed.
        MalformedHash => "stored password hash is malformed: {message}",
    }
}

/// Hashes new passwords and verifies candidates against stored hashes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError>;

    /// `Ok(false)` means the password does not match.
    async fn verify(
        &self,
        password: &Password,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError>;
}
