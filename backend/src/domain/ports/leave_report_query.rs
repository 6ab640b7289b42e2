//! Driving port for the total-leaves report.

use async_trait::async_trait;

use crate::domain::leave::LeaveReport;
use crate::domain::{Error, UserId};

/// Report rows together with the year they cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveReportResponse {
    pub year: i32,
    pub report: LeaveReport,
}

#[async_trait]
pub trait LeaveReportQuery: Send + Sync {
    /// Aggregate leave taken by `manager`'s subordinates in `year`, or in the
    /// current calendar year when `year` is `None`.
    async fn total_leaves_report(
        &self,
        manager: &UserId,
        year: Option<i32>,
    ) -> Result<LeaveReportResponse, Error>;
}
