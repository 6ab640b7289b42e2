//! Diesel row structs. These never leave the persistence module.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{leave_applications, users};

/// Public profile columns of a user.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub manager_id: Option<Uuid>,
}

/// Profile plus password hash, read during sign-in.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserCredentialsRow {
    #[diesel(embed)]
    pub user: UserRow,
    pub password_hash: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub display_name: &'a str,
    pub password_hash: &'a str,
    pub manager_id: Option<Uuid>,
}

/// Profile edit. A `None` manager clears the column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserProfileChangeset<'a> {
    pub email: &'a str,
    pub display_name: &'a str,
    pub manager_id: Option<Uuid>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = leave_applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LeaveApplicationRow {
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub manager_id: Uuid,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = leave_applications)]
pub(crate) struct NewLeaveApplicationRow<'a> {
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub manager_id: Uuid,
    pub leave_type: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: &'a str,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Fields a manager may edit.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = leave_applications)]
pub(crate) struct LeaveApplicationChangeset<'a> {
    pub leave_type: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: &'a str,
    pub status: &'a str,
}
