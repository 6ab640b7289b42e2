//! Port for user persistence.

use async_trait::async_trait;

use crate::domain::{PasswordHash, User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "user repository query failed: {message}",
        /// A uniqueness constraint (username or email) was violated.
        Conflict => "user repository conflict: {message}",
    }
}

/// A user together with the hash of their password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub user: User,
    pub password_hash: PasswordHash,
}

/// Port for reading and writing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user. Duplicate usernames or emails yield `Conflict`.
    async fn insert(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<(), UserRepositoryError>;

    /// Overwrite the profile fields (email, display name, manager) of an
    /// existing user.
    async fn update(&self, user: &User) -> Result<(), UserRepositoryError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Look up a user and their password hash for sign-in.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredCredentials>, UserRepositoryError>;

    /// Fetch every user whose id appears in `ids`. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserRepositoryError>;

    /// All users ordered by username.
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError>;
}
