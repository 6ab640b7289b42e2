//! Validation errors for leave application values.

use std::fmt;

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::Error;

/// Validation errors raised while constructing or editing leave values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveValidationError {
    InvalidId,
    EmptyLeaveType,
    LeaveTypeTooLong { max: usize },
    EmptyReason,
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    UnknownStatus { label: String },
    SelfApproval,
}

impl LeaveValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::EmptyLeaveType | Self::LeaveTypeTooLong { .. } => "leave_type",
            Self::EmptyReason => "reason",
            Self::InvalidDateRange { .. } => "end_date",
            Self::UnknownStatus { .. } => "status",
            Self::SelfApproval => "manager",
        }
    }

    /// Stable machine-readable code for adapters.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::EmptyLeaveType | Self::EmptyReason => "empty",
            Self::LeaveTypeTooLong { .. } => "too_long",
            Self::InvalidDateRange { .. } => "invalid_date_range",
            Self::UnknownStatus { .. } => "unknown_status",
            Self::SelfApproval => "self_approval",
        }
    }
}

impl fmt::Display for LeaveValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "application id must be a valid UUID"),
            Self::EmptyLeaveType => write!(f, "leave type must not be empty"),
            Self::LeaveTypeTooLong { max } => {
                write!(f, "leave type must be at most {max} characters")
            }
            Self::EmptyReason => write!(f, "reason must not be empty"),
            Self::InvalidDateRange { start, end } => {
                write!(f, "end date {end} is before start date {start}")
            }
            Self::UnknownStatus { label } => write!(
                f,
                "unknown status `{label}`; expected Pending, Approved, or Rejected"
            ),
            Self::SelfApproval => write!(f, "an applicant cannot approve their own leave"),
        }
    }
}

impl std::error::Error for LeaveValidationError {}

impl From<LeaveValidationError> for Error {
    fn from(err: LeaveValidationError) -> Self {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": err.field(), "code": err.code() }))
    }
}
