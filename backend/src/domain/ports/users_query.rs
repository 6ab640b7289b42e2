//! Driving port for reading user profiles.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every registered user, ordered by username.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// One user by id; `not_found` when absent.
    async fn get_user(&self, id: &UserId) -> Result<User, Error>;
}
