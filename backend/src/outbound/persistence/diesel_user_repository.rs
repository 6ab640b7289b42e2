//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{StoredCredentials, UserRepository, UserRepositoryError};
use crate::domain::{
    DisplayName, EmailAddress, PasswordHash, User, UserDraft, UserId, UserValidationError,
    Username,
};

use super::diesel_error_mapping::{PortErrorKinds, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserCredentialsRow, UserProfileChangeset, UserRow};
use super::pool::DbPool;
use super::schema::users;

const KINDS: PortErrorKinds<UserRepositoryError> = PortErrorKinds {
    connection: |message| UserRepositoryError::connection(message),
    query: |message| UserRepositoryError::query(message),
    conflict: |message| UserRepositoryError::conflict(message),
};

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let to_query_error =
        |err: UserValidationError| UserRepositoryError::query(format!("invalid user row: {err}"));
    User::new(UserDraft {
        id: UserId::from_uuid(row.id),
        username: Username::new(row.username).map_err(to_query_error)?,
        email: EmailAddress::new(row.email).map_err(to_query_error)?,
        display_name: DisplayName::new(row.display_name).map_err(to_query_error)?,
        manager: row.manager_id.map(UserId::from_uuid),
    })
    .map_err(to_query_error)
}

fn rows_to_users(rows: Vec<UserRow>) -> Result<Vec<User>, UserRepositoryError> {
    rows.into_iter().map(row_to_user).collect()
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<(), UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, &KINDS))?;

        let row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username().as_ref(),
            email: user.email().as_ref(),
            display_name: user.display_name().as_ref(),
            password_hash: password_hash.as_ref(),
            manager_id: user.manager().map(|id| *id.as_uuid()),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, &KINDS))
    }

    async fn update(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, &KINDS))?;

        let changes = UserProfileChangeset {
            email: user.email().as_ref(),
            display_name: user.display_name().as_ref(),
            manager_id: user.manager().map(|id| *id.as_uuid()),
        };
        let updated = diesel::update(users::table.find(*user.id().as_uuid()))
            .set((&changes, users::updated_at.eq(diesel::dsl::now)))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, &KINDS))?;
        if updated == 0 {
            return Err(UserRepositoryError::query(format!(
                "user {} no longer exists",
                user.id()
            )));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, &KINDS))?;

        let row: Option<UserRow> = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, &KINDS))?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredCredentials>, UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, &KINDS))?;

        let row: Option<UserCredentialsRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserCredentialsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, &KINDS))?;
        row.map(|row| {
            Ok(StoredCredentials {
                user: row_to_user(row.user)?,
                password_hash: PasswordHash::new(row.password_hash),
            })
        })
        .transpose()
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, &KINDS))?;

        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(uuids))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, &KINDS))?;
        rows_to_users(rows)
    }

    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, &KINDS))?;

        let rows: Vec<UserRow> = users::table
            .order(users::username.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, &KINDS))?;
        rows_to_users(rows)
    }
}
