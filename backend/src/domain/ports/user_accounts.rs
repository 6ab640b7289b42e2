//! Driving port for registering users and editing profiles.

use async_trait::async_trait;

use crate::domain::{
    DisplayName, EmailAddress, Error, Password, User, UserId, UserProfileUpdate, Username,
};

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct NewUserAccount {
    pub username: Username,
    pub email: EmailAddress,
    pub display_name: DisplayName,
    pub password: Password,
    pub manager: Option<UserId>,
}

#[async_trait]
pub trait UserAccounts: Send + Sync {
    /// Create an account. Username and email must be unused and the manager,
    /// if given, must exist.
    async fn register(&self, account: NewUserAccount) -> Result<User, Error>;

    /// Apply a profile edit to `user_id` and return the stored result.
    async fn update_profile(
        &self,
        user_id: &UserId,
        update: UserProfileUpdate,
    ) -> Result<User, Error>;
}
