//! User account services.
//!
//! These implement the registration, sign-in, and profile query driving ports
//! on top of the user repository and password hasher driven ports.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    LoginService, NewUserAccount, PasswordHasher, PasswordHasherError, UserAccounts,
    UserRepository, UserRepositoryError, UsersQuery,
};
use crate::domain::{Error, LoginCredentials, User, UserDraft, UserId, UserProfileUpdate, Username};

const INVALID_CREDENTIALS: &str = "invalid credentials";

pub(crate) fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::Conflict { message } => {
            Error::conflict(format!("user already exists: {message}"))
        }
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

/// Fail with `invalid_request` unless `manager` names an existing user.
pub(crate) async fn ensure_user_exists<R>(users: &R, manager: &UserId) -> Result<(), Error>
where
    R: UserRepository + ?Sized,
{
    let found = users
        .find_by_id(manager)
        .await
        .map_err(map_user_repository_error)?;
    if found.is_none() {
        return Err(
            Error::invalid_request(format!("manager {manager} does not exist"))
                .with_details(json!({ "field": "manager", "code": "unknown_user" })),
        );
    }
    Ok(())
}

/// Registration and profile edits.
#[derive(Clone)]
pub struct UserAccountService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> UserAccountService<R, H> {
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<R, H> UserAccounts for UserAccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, account: NewUserAccount) -> Result<User, Error> {
        let NewUserAccount {
            username,
            email,
            display_name,
            password,
            manager,
        } = account;

        if let Some(manager) = manager.as_ref() {
            ensure_user_exists(self.users.as_ref(), manager).await?;
        }

        let user = User::new(UserDraft {
            id: UserId::random(),
            username,
            email,
            display_name,
            manager,
        })?;
        let password_hash = self
            .hasher
            .hash(&password)
            .await
            .map_err(map_hasher_error)?;

        self.users
            .insert(&user, &password_hash)
            .await
            .map_err(map_user_repository_error)?;

        info!(user_id = %user.id(), username = %user.username(), "registered user");
        Ok(user)
    }

    async fn update_profile(
        &self,
        user_id: &UserId,
        update: UserProfileUpdate,
    ) -> Result<User, Error> {
        let current = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))?;

        if update.is_empty() {
            return Ok(current);
        }
        // Self-management is rejected by `with_profile` below.
        if let Some(Some(manager)) = update.manager.filter(|m| m.as_ref() != Some(user_id)) {
            ensure_user_exists(self.users.as_ref(), &manager).await?;
        }

        let updated = current.with_profile(update)?;
        self.users
            .update(&updated)
            .await
            .map_err(map_user_repository_error)?;
        Ok(updated)
    }
}

/// Credential verification backed by stored password hashes.
#[derive(Clone)]
pub struct UserLoginService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> UserLoginService<R, H> {
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<R, H> LoginService for UserLoginService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        // A username that cannot exist is reported like any other miss.
        let Ok(username) = Username::new(credentials.username()) else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        let stored = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;

        let matches = self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
            .await
            .map_err(map_hasher_error)?;
        if !matches {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(stored.user)
    }
}

/// Read-only access to user profiles.
#[derive(Clone)]
pub struct UsersQueryService<R> {
    users: Arc<R>,
}

impl<R> UsersQueryService<R> {
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<R> UsersQuery for UsersQueryService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users.list().await.map_err(map_user_repository_error)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
