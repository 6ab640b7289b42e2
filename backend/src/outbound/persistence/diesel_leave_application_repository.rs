//! PostgreSQL-backed `LeaveApplicationRepository` implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::UserId;
use crate::domain::leave::{
    LeaveApplication, LeaveApplicationId, LeaveApplicationParts, LeaveDateRange, LeaveReason,
    LeaveStatus, LeaveType,
};
use crate::domain::ports::{LeaveApplicationRepository, LeaveApplicationRepositoryError};

use super::diesel_error_mapping::{PortErrorKinds, map_diesel_error, map_pool_error};
use super::models::{LeaveApplicationChangeset, LeaveApplicationRow, NewLeaveApplicationRow};
use super::pool::DbPool;
use super::schema::leave_applications;

const KINDS: PortErrorKinds<LeaveApplicationRepositoryError> = PortErrorKinds {
    connection: |message| LeaveApplicationRepositoryError::connection(message),
    query: |message| LeaveApplicationRepositoryError::query(message),
    conflict: |message| LeaveApplicationRepositoryError::conflict(message),
};

/// Diesel-backed implementation of the `LeaveApplicationRepository` port.
#[derive(Clone)]
pub struct DieselLeaveApplicationRepository {
    pool: DbPool,
}

impl DieselLeaveApplicationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_application(
    row: LeaveApplicationRow,
) -> Result<LeaveApplication, LeaveApplicationRepositoryError> {
    let corrupt = |detail: String| {
        LeaveApplicationRepositoryError::query(format!(
            "invalid leave application row {}: {detail}",
            row.id
        ))
    };
    let leave_type = LeaveType::new(&row.leave_type).map_err(|err| corrupt(err.to_string()))?;
    let reason = LeaveReason::new(&row.reason).map_err(|err| corrupt(err.to_string()))?;
    let dates = LeaveDateRange::new(row.start_date, row.end_date)
        .map_err(|err| corrupt(err.to_string()))?;
    let status: LeaveStatus = row
        .status
        .parse()
        .map_err(|err: crate::domain::leave::ParseLeaveStatusError| corrupt(err.to_string()))?;

    LeaveApplication::from_parts(LeaveApplicationParts {
        id: LeaveApplicationId::from_uuid(row.id),
        applicant: UserId::from_uuid(row.applicant_id),
        manager: UserId::from_uuid(row.manager_id),
        leave_type,
        dates,
        reason,
        status,
        created_at: row.created_at,
    })
    .map_err(|err| corrupt(err.to_string()))
}

fn rows_to_applications(
    rows: Vec<LeaveApplicationRow>,
) -> Result<Vec<LeaveApplication>, LeaveApplicationRepositoryError> {
    rows.into_iter().map(row_to_application).collect()
}

/// Half-open `[Jan 1, next Jan 1)` window; `None` when the year is out of
/// chrono's range.
fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let end = NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?;
    Some((start, end))
}

#[async_trait]
impl LeaveApplicationRepository for DieselLeaveApplicationRepository {
    async fn insert(
        &self,
        application: &LeaveApplication,
    ) -> Result<(), LeaveApplicationRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, &KINDS))?;

        let dates = application.dates();
        let row = NewLeaveApplicationRow {
            id: *application.id().as_uuid(),
            applicant_id: *application.applicant().as_uuid(),
            manager_id: *application.manager().as_uuid(),
            leave_type: application.leave_type().as_ref(),
            start_date: dates.start(),
            end_date: dates.end(),
            reason: application.reason().as_ref(),
            status: application.status().as_str(),
            created_at: application.created_at(),
        };
        diesel::insert_into(leave_applications::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, &KINDS))
    }

    async fn update(
        &self,
        application: &LeaveApplication,
    ) -> Result<(), LeaveApplicationRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, &KINDS))?;

        let dates = application.dates();
        let changes = LeaveApplicationChangeset {
            leave_type: application.leave_type().as_ref(),
            start_date: dates.start(),
            end_date: dates.end(),
            reason: application.reason().as_ref(),
            status: application.status().as_str(),
        };
        let updated = diesel::update(leave_applications::table.find(*application.id().as_uuid()))
            .set((&changes, leave_applications::updated_at.eq(diesel::dsl::now)))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, &KINDS))?;
        if updated == 0 {
            return Err(LeaveApplicationRepositoryError::query(format!(
                "leave application {} no longer exists",
                application.id()
            )));
        }
        Ok(())
    }

    async fn delete(
        &self,
        id: &LeaveApplicationId,
    ) -> Result<bool, LeaveApplicationRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, &KINDS))?;

        let removed = diesel::delete(leave_applications::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, &KINDS))?;
        Ok(removed > 0)
    }

    async fn find(
        &self,
        id: &LeaveApplicationId,
    ) -> Result<Option<LeaveApplication>, LeaveApplicationRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, &KINDS))?;

        let row: Option<LeaveApplicationRow> = leave_applications::table
            .find(*id.as_uuid())
            .select(LeaveApplicationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, &KINDS))?;
        row.map(row_to_application).transpose()
    }

    async fn list_for_applicant(
        &self,
        applicant: &UserId,
    ) -> Result<Vec<LeaveApplication>, LeaveApplicationRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, &KINDS))?;

        let rows: Vec<LeaveApplicationRow> = leave_applications::table
            .filter(leave_applications::applicant_id.eq(*applicant.as_uuid()))
            .order((
                leave_applications::created_at.desc(),
                leave_applications::id.desc(),
            ))
            .select(LeaveApplicationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, &KINDS))?;
        rows_to_applications(rows)
    }

    async fn list_for_manager(
        &self,
        manager: &UserId,
    ) -> Result<Vec<LeaveApplication>, LeaveApplicationRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, &KINDS))?;

        let rows: Vec<LeaveApplicationRow> = leave_applications::table
            .filter(leave_applications::manager_id.eq(*manager.as_uuid()))
            .order((
                leave_applications::created_at.desc(),
                leave_applications::id.desc(),
            ))
            .select(LeaveApplicationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, &KINDS))?;
        rows_to_applications(rows)
    }

    async fn list_for_manager_in_year(
        &self,
        manager: &UserId,
        year: i32,
    ) -> Result<Vec<LeaveApplication>, LeaveApplicationRepositoryError> {
        let Some((from, until)) = year_bounds(year) else {
            return Ok(Vec::new());
        };
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, &KINDS))?;

        let rows: Vec<LeaveApplicationRow> = leave_applications::table
            .filter(leave_applications::manager_id.eq(*manager.as_uuid()))
            .filter(leave_applications::start_date.ge(from))
            .filter(leave_applications::start_date.lt(until))
            .order((
                leave_applications::created_at.desc(),
                leave_applications::id.desc(),
            ))
            .select(LeaveApplicationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, &KINDS))?;
        rows_to_applications(rows)
    }
}
