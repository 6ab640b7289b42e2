//! Driving port for sign-in.
//!
//! Inbound adapters call this to check credentials without knowing how users
//! or hashes are stored.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user.
    ///
    /// Unknown usernames and wrong passwords both yield `unauthorized` with
    /// the same message.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
