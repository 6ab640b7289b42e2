//! Leave application services.
//!
//! The command and query services enforce the object-level access policy;
//! the report service only aggregates and never consults it.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Datelike;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::leave::{
    LeaveAccess, LeaveApplication, LeaveApplicationEdit, LeaveApplicationId,
    LeaveApplicationParts, LeaveOperation, LeaveReport, LeaveStatus, aggregate_leave,
};
use crate::domain::ports::{
    LeaveApplicationCommand, LeaveApplicationQuery, LeaveApplicationRepository,
    LeaveApplicationRepositoryError, LeaveReportQuery, LeaveReportResponse, LeaveSubmission,
    SubordinateApplication, UserRepository,
};
use crate::domain::user_service::{ensure_user_exists, map_user_repository_error};
use crate::domain::{DisplayName, Error, User, UserId};

fn map_repository_error(error: LeaveApplicationRepositoryError) -> Error {
    match error {
        LeaveApplicationRepositoryError::Connection { message } => Error::service_unavailable(
            format!("leave application repository unavailable: {message}"),
        ),
        LeaveApplicationRepositoryError::Query { message } => {
            Error::internal(format!("leave application repository error: {message}"))
        }
        LeaveApplicationRepositoryError::Conflict { message } => {
            Error::conflict(format!("leave application conflict: {message}"))
        }
    }
}

async fn load_application<L>(
    applications: &L,
    id: &LeaveApplicationId,
) -> Result<LeaveApplication, Error>
where
    L: LeaveApplicationRepository + ?Sized,
{
    applications
        .find(id)
        .await
        .map_err(map_repository_error)?
        .ok_or_else(|| Error::not_found(format!("leave application {id} not found")))
}

/// Resolve the users named by `ids`, keyed by id.
async fn users_by_id<U>(users: &U, ids: BTreeSet<UserId>) -> Result<BTreeMap<UserId, User>, Error>
where
    U: UserRepository + ?Sized,
{
    if ids.is_empty() {
        return Ok(BTreeMap::new());
    }
    let ids: Vec<UserId> = ids.into_iter().collect();
    let found = users
        .find_by_ids(&ids)
        .await
        .map_err(map_user_repository_error)?;
    Ok(found.into_iter().map(|user| (user.id(), user)).collect())
}

/// Submission, manager edits, and applicant deletion.
#[derive(Clone)]
pub struct LeaveApplicationCommandService<L, U> {
    applications: Arc<L>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<L, U> LeaveApplicationCommandService<L, U> {
    pub fn new(applications: Arc<L>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            applications,
            users,
            clock,
        }
    }
}

#[async_trait]
impl<L, U> LeaveApplicationCommand for LeaveApplicationCommandService<L, U>
where
    L: LeaveApplicationRepository,
    U: UserRepository,
{
    async fn submit(
        &self,
        applicant: &UserId,
        submission: LeaveSubmission,
    ) -> Result<LeaveApplication, Error> {
        let LeaveSubmission {
            manager,
            leave_type,
            dates,
            reason,
        } = submission;

        let application = LeaveApplication::submit(LeaveApplicationParts {
            id: LeaveApplicationId::random(),
            applicant: *applicant,
            manager,
            leave_type,
            dates,
            reason,
            status: LeaveStatus::Pending,
            created_at: self.clock.utc(),
        })?;
        ensure_user_exists(self.users.as_ref(), &manager).await?;

        self.applications
            .insert(&application)
            .await
            .map_err(map_repository_error)?;

        info!(
            application_id = %application.id(),
            applicant = %applicant,
            manager = %manager,
            "leave application submitted"
        );
        Ok(application)
    }

    async fn update(
        &self,
        actor: &UserId,
        id: &LeaveApplicationId,
        edit: LeaveApplicationEdit,
    ) -> Result<LeaveApplication, Error> {
        let current = load_application(self.applications.as_ref(), id).await?;
        LeaveAccess::authorize(*actor, &current, LeaveOperation::Update)?;

        let previous_status = current.status();
        let updated = current.apply(edit)?;
        self.applications
            .update(&updated)
            .await
            .map_err(map_repository_error)?;

        if updated.status() != previous_status {
            info!(
                application_id = %id,
                from = %previous_status,
                to = %updated.status(),
                "leave application status changed"
            );
        }
        Ok(updated)
    }

    async fn delete(&self, actor: &UserId, id: &LeaveApplicationId) -> Result<(), Error> {
        let current = load_application(self.applications.as_ref(), id).await?;
        LeaveAccess::authorize(*actor, &current, LeaveOperation::Delete)?;

        let removed = self
            .applications
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(Error::not_found(format!("leave application {id} not found")));
        }
        info!(application_id = %id, "leave application deleted");
        Ok(())
    }
}

/// Reads for applicants and approving managers.
#[derive(Clone)]
pub struct LeaveApplicationQueryService<L, U> {
    applications: Arc<L>,
    users: Arc<U>,
}

impl<L, U> LeaveApplicationQueryService<L, U> {
    pub fn new(applications: Arc<L>, users: Arc<U>) -> Self {
        Self {
            applications,
            users,
        }
    }
}

#[async_trait]
impl<L, U> LeaveApplicationQuery for LeaveApplicationQueryService<L, U>
where
    L: LeaveApplicationRepository,
    U: UserRepository,
{
    async fn get(
        &self,
        actor: &UserId,
        id: &LeaveApplicationId,
    ) -> Result<LeaveApplication, Error> {
        let application = load_application(self.applications.as_ref(), id).await?;
        LeaveAccess::authorize(*actor, &application, LeaveOperation::Read)?;
        Ok(application)
    }

    async fn list_own(&self, actor: &UserId) -> Result<Vec<LeaveApplication>, Error> {
        self.applications
            .list_for_applicant(actor)
            .await
            .map_err(map_repository_error)
    }

    async fn list_subordinate(&self, actor: &UserId) -> Result<Vec<SubordinateApplication>, Error> {
        let applications = self
            .applications
            .list_for_manager(actor)
            .await
            .map_err(map_repository_error)?;
        let applicants = users_by_id(
            self.users.as_ref(),
            applications.iter().map(LeaveApplication::applicant).collect(),
        )
        .await?;

        applications
            .into_iter()
            .map(|application| {
                let applicant = applicants.get(&application.applicant()).cloned().ok_or_else(
                    || {
                        Error::internal(format!(
                            "leave application {} references unknown applicant {}",
                            application.id(),
                            application.applicant()
                        ))
                    },
                )?;
                Ok(SubordinateApplication {
                    application,
                    applicant,
                })
            })
            .collect()
    }
}

/// Total-leaves report for a manager.
#[derive(Clone)]
pub struct LeaveReportService<L, U> {
    applications: Arc<L>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<L, U> LeaveReportService<L, U> {
    pub fn new(applications: Arc<L>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            applications,
            users,
            clock,
        }
    }
}

#[async_trait]
impl<L, U> LeaveReportQuery for LeaveReportService<L, U>
where
    L: LeaveApplicationRepository,
    U: UserRepository,
{
    async fn total_leaves_report(
        &self,
        manager: &UserId,
        year: Option<i32>,
    ) -> Result<LeaveReportResponse, Error> {
        let year = year.unwrap_or_else(|| self.clock.utc().year());
        let applications = self
            .applications
            .list_for_manager_in_year(manager, year)
            .await
            .map_err(map_repository_error)?;

        let totals = aggregate_leave(&applications, year);
        let names: BTreeMap<UserId, DisplayName> = users_by_id(
            self.users.as_ref(),
            totals.iter().map(|row| row.employee).collect(),
        )
        .await?
        .into_iter()
        .map(|(id, user)| (id, user.display_name().clone()))
        .collect();
        let report = LeaveReport::from_totals(totals, &names)?;

        debug!(
            manager = %manager,
            year,
            applications = applications.len(),
            rows = report.records().len(),
            "built total leaves report"
        );
        Ok(LeaveReportResponse { year, report })
    }
}

#[cfg(test)]
#[path = "leave_service_tests.rs"]
mod tests;
