//! `UserRepository` over an in-process map.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{StoredCredentials, UserRepository, UserRepositoryError};
use crate::domain::{PasswordHash, User, UserId, Username};

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    records: RwLock<BTreeMap<UserId, StoredCredentials>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Mirrors the unique constraints on `users.username` and `users.email`.
fn ensure_unique(
    records: &BTreeMap<UserId, StoredCredentials>,
    user: &User,
) -> Result<(), UserRepositoryError> {
    for (id, stored) in records {
        if *id == user.id() {
            continue;
        }
        if stored.user.username() == user.username() {
            return Err(UserRepositoryError::conflict(format!(
                "username {} is taken",
                user.username()
            )));
        }
        if stored.user.email() == user.email() {
            return Err(UserRepositoryError::conflict(format!(
                "email {} is taken",
                user.email()
            )));
        }
    }
    Ok(())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<(), UserRepositoryError> {
        let mut records = self.records.write().await;
        if records.contains_key(&user.id()) {
            return Err(UserRepositoryError::conflict(format!(
                "user {} already exists",
                user.id()
            )));
        }
        ensure_unique(&records, user)?;
        records.insert(
            user.id(),
            StoredCredentials {
                user: user.clone(),
                password_hash: password_hash.clone(),
            },
        );
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut records = self.records.write().await;
        ensure_unique(&records, user)?;
        let stored = records.get_mut(&user.id()).ok_or_else(|| {
            UserRepositoryError::query(format!("user {} no longer exists", user.id()))
        })?;
        stored.user = user.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let records = self.records.read().await;
        Ok(records.get(id).map(|stored| stored.user.clone()))
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredCredentials>, UserRepositoryError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|stored| stored.user.username() == username)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserRepositoryError> {
        let records = self.records.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| records.get(id))
            .map(|stored| stored.user.clone())
            .collect())
    }

    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        let records = self.records.read().await;
        let mut users: Vec<User> = records.values().map(|stored| stored.user.clone()).collect();
        users.sort_by(|a, b| a.username().as_ref().cmp(b.username().as_ref()));
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, EmailAddress, UserDraft};
    use rstest::rstest;

    fn user(username: &str, email: &str) -> User {
        User::new(UserDraft {
            id: UserId::random(),
            username: Username::new(username).expect("username"),
            email: EmailAddress::new(email).expect("email"),
            display_name: DisplayName::new(username).expect("display name"),
            manager: None,
        })
        .expect("user")
    }

    #[rstest]
    #[case::same_username("ada", "other@example.com")]
    #[case::same_email("other", "ADA@example.com")]
    #[tokio::test]
    async fn duplicates_conflict(#[case] username: &str, #[case] email: &str) {
        let repo = InMemoryUserRepository::new();
        repo.insert(&user("ada", "ada@example.com"), &PasswordHash::new("h"))
            .await
            .expect("first insert");

        let err = repo
            .insert(&user(username, email), &PasswordHash::new("h"))
            .await
            .expect_err("duplicate");
        assert!(matches!(err, UserRepositoryError::Conflict { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn list_is_ordered_by_username() {
        let repo = InMemoryUserRepository::new();
        for name in ["carol", "alice", "bob"] {
            repo.insert(&user(name, &format!("{name}@example.com")), &PasswordHash::new("h"))
                .await
                .expect("insert");
        }
        let names: Vec<String> = repo
            .list()
            .await
            .expect("list")
            .iter()
            .map(|u| u.username().to_string())
            .collect();
        assert_eq!(names, ["alice", "bob", "carol"]);
    }

    #[rstest]
    #[tokio::test]
    async fn find_by_username_returns_hash() {
        let repo = InMemoryUserRepository::new();
        let ada = user("ada", "ada@example.com");
        repo.insert(&ada, &PasswordHash::new("$argon2id$stub"))
            .await
            .expect("insert");

        let stored = repo
            .find_by_username(ada.username())
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(stored.user, ada);
        assert_eq!(stored.password_hash.as_ref(), "$argon2id$stub");
    }
}
