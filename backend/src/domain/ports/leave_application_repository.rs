//! Port for leave application persistence.

use async_trait::async_trait;

use crate::domain::UserId;
use crate::domain::leave::{LeaveApplication, LeaveApplicationId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by leave application repository adapters.
    pub enum LeaveApplicationRepositoryError {
        /// Repository connection could not be established.
        Connection => "leave application repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "leave application repository query failed: {message}",
        /// A constraint was violated, e.g. a referenced user is missing.
        Conflict => "leave application repository conflict: {message}",
    }
}

/// Port for reading and writing leave applications.
///
/// List operations return the newest application first (by `created_at`).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaveApplicationRepository: Send + Sync {
    async fn insert(
        &self,
        application: &LeaveApplication,
    ) -> Result<(), LeaveApplicationRepositoryError>;

    /// Overwrite the mutable fields of an existing application.
    async fn update(
        &self,
        application: &LeaveApplication,
    ) -> Result<(), LeaveApplicationRepositoryError>;

    /// Remove an application, returning whether a row was deleted.
    async fn delete(
        &self,
        id: &LeaveApplicationId,
    ) -> Result<bool, LeaveApplicationRepositoryError>;

    async fn find(
        &self,
        id: &LeaveApplicationId,
    ) -> Result<Option<LeaveApplication>, LeaveApplicationRepositoryError>;

    /// Applications submitted by `applicant`.
    async fn list_for_applicant(
        &self,
        applicant: &UserId,
    ) -> Result<Vec<LeaveApplication>, LeaveApplicationRepositoryError>;

    /// Applications naming `manager` as approver.
    async fn list_for_manager(
        &self,
        manager: &UserId,
    ) -> Result<Vec<LeaveApplication>, LeaveApplicationRepositoryError>;

    /// Applications naming `manager` as approver whose start date falls in
    /// `year`.
    async fn list_for_manager_in_year(
        &self,
        manager: &UserId,
        year: i32,
    ) -> Result<Vec<LeaveApplication>, LeaveApplicationRepositoryError>;
}
