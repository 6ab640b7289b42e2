//! Driving port for leave application mutations.

use async_trait::async_trait;

use crate::domain::leave::{
    LeaveApplication, LeaveApplicationEdit, LeaveApplicationId, LeaveDateRange, LeaveReason,
    LeaveType,
};
use crate::domain::{Error, UserId};

/// Validated submission from an applicant.
#[derive(Debug, Clone)]
pub struct LeaveSubmission {
    pub manager: UserId,
    pub leave_type: LeaveType,
    pub dates: LeaveDateRange,
    pub reason: LeaveReason,
}

#[async_trait]
pub trait LeaveApplicationCommand: Send + Sync {
    /// Submit a new application as `applicant`. The result is always pending.
    async fn submit(
        &self,
        applicant: &UserId,
        submission: LeaveSubmission,
    ) -> Result<LeaveApplication, Error>;

    /// Edit an application; only its approving manager may do so.
    async fn update(
        &self,
        actor: &UserId,
        id: &LeaveApplicationId,
        edit: LeaveApplicationEdit,
    ) -> Result<LeaveApplication, Error>;

    /// Delete an application; only its applicant may do so.
    async fn delete(&self, actor: &UserId, id: &LeaveApplicationId) -> Result<(), Error>;
}
