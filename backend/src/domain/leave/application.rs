//! Leave application entity and its value types.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{LeaveStatus, LeaveValidationError, day_span};
use crate::domain::UserId;

/// Maximum allowed length for a leave type label.
pub const LEAVE_TYPE_MAX: usize = 255;

/// Stable identifier of a leave application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaveApplicationId(Uuid);

impl LeaveApplicationId {
    /// Parse an identifier from its hyphenated string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, LeaveValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| LeaveValidationError::InvalidId)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for LeaveApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-text leave category such as `Vacation` or `Sick`.
///
/// Labels are compared exactly, so `Sick` and `sick` are different types.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LeaveType(String);

impl LeaveType {
    /// Validate a label; surrounding whitespace is trimmed, case is kept.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, LeaveValidationError> {
        let value = raw.as_ref().trim();
        if value.is_empty() {
            return Err(LeaveValidationError::EmptyLeaveType);
        }
        if value.chars().count() > LEAVE_TYPE_MAX {
            return Err(LeaveValidationError::LeaveTypeTooLong {
                max: LEAVE_TYPE_MAX,
            });
        }
        Ok(Self(value.to_owned()))
    }
}

impl AsRef<str> for LeaveType {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Applicant's explanation for the leave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveReason(String);

impl LeaveReason {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, LeaveValidationError> {
        let value = raw.as_ref().trim();
        if value.is_empty() {
            return Err(LeaveValidationError::EmptyReason);
        }
        Ok(Self(value.to_owned()))
    }
}

impl AsRef<str> for LeaveReason {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Inclusive calendar range with `end >= start`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use leavedesk::domain::leave::LeaveDateRange;
///
/// let start = NaiveDate::from_ymd_opt(2024, 12, 30).expect("valid date");
/// let end = NaiveDate::from_ymd_opt(2025, 1, 2).expect("valid date");
/// let range = LeaveDateRange::new(start, end).expect("ordered range");
/// assert_eq!(range.day_span(), 4);
/// assert_eq!(range.year(), 2024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveDateRange {
    start: NaiveDate,
    end: NaiveDate,
    days: u32,
}

impl LeaveDateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, LeaveValidationError> {
        let days = day_span(start, end)?;
        Ok(Self { start, end, days })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive number of days covered; always at least one.
    pub fn day_span(&self) -> u32 {
        self.days
    }

    /// Calendar year the range is attributed to, taken from the start date.
    pub fn year(&self) -> i32 {
        self.start.year()
    }
}

/// Components of a leave application, used when building or restoring one.
#[derive(Debug, Clone)]
pub struct LeaveApplicationParts {
    pub id: LeaveApplicationId,
    pub applicant: UserId,
    pub manager: UserId,
    pub leave_type: LeaveType,
    pub dates: LeaveDateRange,
    pub reason: LeaveReason,
    pub status: LeaveStatus,
    pub created_at: DateTime<Utc>,
}

/// Leave request raised by an applicant and decided by a named manager.
///
/// ## Invariants
/// - `manager` differs from `applicant`.
/// - `dates` is ordered, so its day span is at least one.
/// - `applicant` and `manager` never change after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveApplication {
    id: LeaveApplicationId,
    applicant: UserId,
    manager: UserId,
    leave_type: LeaveType,
    dates: LeaveDateRange,
    reason: LeaveReason,
    status: LeaveStatus,
    created_at: DateTime<Utc>,
}

impl LeaveApplication {
    /// Build an application from stored or freshly validated parts.
    pub fn from_parts(parts: LeaveApplicationParts) -> Result<Self, LeaveValidationError> {
        let LeaveApplicationParts {
            id,
            applicant,
            manager,
            leave_type,
            dates,
            reason,
            status,
            created_at,
        } = parts;
        if applicant == manager {
            return Err(LeaveValidationError::SelfApproval);
        }
        Ok(Self {
            id,
            applicant,
            manager,
            leave_type,
            dates,
            reason,
            status,
            created_at,
        })
    }

    /// Build a new submission. The status is always [`LeaveStatus::Pending`],
    /// whatever `parts.status` holds.
    pub fn submit(parts: LeaveApplicationParts) -> Result<Self, LeaveValidationError> {
        Self::from_parts(LeaveApplicationParts {
            status: LeaveStatus::Pending,
            ..parts
        })
    }

    pub fn id(&self) -> LeaveApplicationId {
        self.id
    }

    pub fn applicant(&self) -> UserId {
        self.applicant
    }

    pub fn manager(&self) -> UserId {
        self.manager
    }

    pub fn leave_type(&self) -> &LeaveType {
        &self.leave_type
    }

    pub fn dates(&self) -> LeaveDateRange {
        self.dates
    }

    pub fn reason(&self) -> &LeaveReason {
        &self.reason
    }

    pub fn status(&self) -> LeaveStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Apply a manager edit, re-validating the merged date range.
    pub fn apply(self, edit: LeaveApplicationEdit) -> Result<Self, LeaveValidationError> {
        let dates = match (edit.start_date, edit.end_date) {
            (None, None) => self.dates,
            (start, end) => LeaveDateRange::new(
                start.unwrap_or(self.dates.start),
                end.unwrap_or(self.dates.end),
            )?,
        };
        Ok(Self {
            leave_type: edit.leave_type.unwrap_or(self.leave_type),
            reason: edit.reason.unwrap_or(self.reason),
            status: edit.status.unwrap_or(self.status),
            dates,
            ..self
        })
    }
}

/// Partial edit applied by the approving manager. `None` keeps a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaveApplicationEdit {
    pub leave_type: Option<LeaveType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub reason: Option<LeaveReason>,
    pub status: Option<LeaveStatus>,
}
