//! Driving port for reading leave applications.

use async_trait::async_trait;

use crate::domain::leave::{LeaveApplication, LeaveApplicationId};
use crate::domain::{Error, User, UserId};

/// An application awaiting a manager, paired with its applicant's profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubordinateApplication {
    pub application: LeaveApplication,
    pub applicant: User,
}

#[async_trait]
pub trait LeaveApplicationQuery: Send + Sync {
    /// One application, readable by its applicant or approving manager.
    async fn get(&self, actor: &UserId, id: &LeaveApplicationId)
    -> Result<LeaveApplication, Error>;

    /// Applications submitted by `actor`, newest first.
    async fn list_own(&self, actor: &UserId) -> Result<Vec<LeaveApplication>, Error>;

    /// Applications naming `actor` as approving manager, newest first.
    async fn list_subordinate(&self, actor: &UserId) -> Result<Vec<SubordinateApplication>, Error>;
}
