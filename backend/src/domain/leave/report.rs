//! Leave usage aggregation and the report rows built from it.
//!
//! [`aggregate_leave`] folds one manager's applications into per-employee,
//! per-leave-type day totals split by status. [`LeaveReport::from_totals`]
//! then attaches display names to produce the rows returned to callers.
//!
//! Rows are ordered by employee id ascending, then by leave type label
//! (byte-wise, case sensitive). Applications are attributed to the year of
//! their start date, so a range crossing New Year counts fully towards the
//! earlier year.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{LeaveApplication, LeaveStatus, LeaveType};
use crate::domain::{DisplayName, Error, UserId};

/// Day totals for one employee and leave type.
///
/// Because [`LeaveStatus`] is closed, `total == pending + approved + rejected`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeaveTally {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
}

impl LeaveTally {
    fn record(&mut self, status: LeaveStatus, days: u32) {
        let days = u64::from(days);
        self.total += days;
        match status {
            LeaveStatus::Pending => self.pending += days,
            LeaveStatus::Approved => self.approved += days,
            LeaveStatus::Rejected => self.rejected += days,
        }
    }
}

/// Aggregated usage keyed by employee and leave type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveTotals {
    pub employee: UserId,
    pub leave_type: LeaveType,
    pub tally: LeaveTally,
}

/// Sum day spans per `(applicant, leave_type)` for applications starting in
/// `year`.
///
/// The caller supplies one manager's applications; the fold only groups on
/// the applicant recorded on each application and ignores the organisational
/// hierarchy. An empty input yields an empty result.
///
/// # Examples
/// ```
/// use leavedesk::domain::leave::{LeaveApplication, aggregate_leave};
///
/// let none: Vec<LeaveApplication> = Vec::new();
/// assert!(aggregate_leave(&none, 2024).is_empty());
/// ```
pub fn aggregate_leave<'a, I>(applications: I, year: i32) -> Vec<LeaveTotals>
where
    I: IntoIterator<Item = &'a LeaveApplication>,
{
    let mut groups: BTreeMap<(UserId, LeaveType), LeaveTally> = BTreeMap::new();
    for application in applications {
        let dates = application.dates();
        if dates.year() != year {
            continue;
        }
        groups
            .entry((application.applicant(), application.leave_type().clone()))
            .or_default()
            .record(application.status(), dates.day_span());
    }

    groups
        .into_iter()
        .map(|((employee, leave_type), tally)| LeaveTotals {
            employee,
            leave_type,
            tally,
        })
        .collect()
}

/// One row of the total-leaves report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LeaveReportRecord {
    #[schema(example = "Test User")]
    pub employee_name: String,
    #[schema(example = "Vacation")]
    pub leave_type: String,
    #[schema(example = 5)]
    pub total_days: u64,
    #[schema(example = 0)]
    pub pending_days: u64,
    #[schema(example = 5)]
    pub approved_days: u64,
    #[schema(example = 0)]
    pub rejected_days: u64,
}

/// Ordered report rows for one manager and year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaveReport {
    records: Vec<LeaveReportRecord>,
}

impl LeaveReport {
    /// Attach display names to aggregated totals, keeping their order.
    ///
    /// Every employee in `totals` must have an entry in `names`; a gap means
    /// the store lost a user that still owns applications and is reported as
    /// an internal error.
    pub fn from_totals(
        totals: Vec<LeaveTotals>,
        names: &BTreeMap<UserId, DisplayName>,
    ) -> Result<Self, Error> {
        let records = totals
            .into_iter()
            .map(|totals| {
                let name = names.get(&totals.employee).ok_or_else(|| {
                    Error::internal(format!(
                        "leave report references unknown employee {}",
                        totals.employee
                    ))
                })?;
                Ok(LeaveReportRecord {
                    employee_name: name.to_string(),
                    leave_type: totals.leave_type.to_string(),
                    total_days: totals.tally.total,
                    pending_days: totals.tally.pending,
                    approved_days: totals.tally.approved,
                    rejected_days: totals.tally.rejected,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(Self { records })
    }

    pub fn records(&self) -> &[LeaveReportRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<LeaveReportRecord> {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
