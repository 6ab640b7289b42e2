//! Approval status of a leave application.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::LeaveValidationError;

/// Where an application sits in the approval workflow.
///
/// The set is closed: every application is in exactly one of these states,
/// which lets the report partition day totals exhaustively.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    /// Label used on the wire and in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

/// Error returned when parsing an unknown status label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLeaveStatusError(String);

impl fmt::Display for ParseLeaveStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown leave status `{}`; expected Pending, Approved, or Rejected",
            self.0
        )
    }
}

impl std::error::Error for ParseLeaveStatusError {}

impl From<ParseLeaveStatusError> for LeaveValidationError {
    fn from(err: ParseLeaveStatusError) -> Self {
        Self::UnknownStatus { label: err.0 }
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaveStatus {
    type Err = ParseLeaveStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Pending" => Ok(Self::Pending),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            other => Err(ParseLeaveStatusError(other.to_owned())),
        }
    }
}
