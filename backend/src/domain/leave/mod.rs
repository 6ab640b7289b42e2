//! Leave applications, the access policy guarding them, and the usage
//! report computed over them.

mod access;
mod application;
mod day_span;
mod report;
mod status;
mod validation;

pub use self::access::{LeaveAccess, LeaveOperation};
pub use self::application::{
    LEAVE_TYPE_MAX, LeaveApplication, LeaveApplicationEdit, LeaveApplicationId,
    LeaveApplicationParts, LeaveDateRange, LeaveReason, LeaveType,
};
pub use self::day_span::day_span;
pub use self::report::{
    LeaveReport, LeaveReportRecord, LeaveTally, LeaveTotals, aggregate_leave,
};
pub use self::status::{LeaveStatus, ParseLeaveStatusError};
pub use self::validation::LeaveValidationError;
