//! Object-level access rules for leave applications.

use super::LeaveApplication;
use crate::domain::{Error, UserId};

/// Operation an actor wants to perform on an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOperation {
    Read,
    Update,
    Delete,
}

/// Capability check parameterised by actor, record, and operation.
///
/// - Read: the applicant or the approving manager.
/// - Update: the approving manager only.
/// - Delete: the applicant only.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaveAccess;

impl LeaveAccess {
    /// Return `Ok(())` when `actor` may perform `operation` on `application`.
    ///
    /// # Examples
    /// ```
    /// use chrono::{NaiveDate, Utc};
    /// use leavedesk::domain::UserId;
    /// use leavedesk::domain::leave::{
    ///     LeaveAccess, LeaveApplication, LeaveApplicationId, LeaveApplicationParts,
    ///     LeaveDateRange, LeaveOperation, LeaveReason, LeaveStatus, LeaveType,
    /// };
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    /// let applicant = UserId::random();
    /// let manager = UserId::random();
    /// let application = LeaveApplication::submit(LeaveApplicationParts {
    ///     id: LeaveApplicationId::random(),
    ///     applicant,
    ///     manager,
    ///     leave_type: LeaveType::new("Sick").expect("leave type"),
    ///     dates: LeaveDateRange::new(day, day).expect("range"),
    ///     reason: LeaveReason::new("Flu").expect("reason"),
    ///     status: LeaveStatus::Pending,
    ///     created_at: Utc::now(),
    /// })
    /// .expect("valid application");
    ///
    /// assert!(LeaveAccess::authorize(manager, &application, LeaveOperation::Update).is_ok());
    /// assert!(LeaveAccess::authorize(applicant, &application, LeaveOperation::Update).is_err());
    /// ```
    pub fn authorize(
        actor: UserId,
        application: &LeaveApplication,
        operation: LeaveOperation,
    ) -> Result<(), Error> {
        let is_applicant = actor == application.applicant();
        let is_manager = actor == application.manager();
        let allowed = match operation {
            LeaveOperation::Read => is_applicant || is_manager,
            LeaveOperation::Update => is_manager,
            LeaveOperation::Delete => is_applicant,
        };
        if allowed {
            Ok(())
        } else {
            Err(Error::forbidden(format!(
                "not permitted to {} leave application {}",
                operation.verb(),
                application.id()
            )))
        }
    }
}

impl LeaveOperation {
    fn verb(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}
