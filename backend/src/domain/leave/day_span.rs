//! Inclusive day counting between two calendar dates.

use chrono::NaiveDate;

use super::LeaveValidationError;

/// Number of calendar days covered by `start..=end`.
///
/// A leave that starts and ends on the same day spans one day. An `end`
/// before `start` is rejected rather than clamped.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use leavedesk::domain::leave::day_span;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
/// let end = NaiveDate::from_ymd_opt(2024, 1, 5).expect("valid date");
/// assert_eq!(day_span(start, end), Ok(5));
/// assert!(day_span(end, start).is_err());
/// ```
pub fn day_span(start: NaiveDate, end: NaiveDate) -> Result<u32, LeaveValidationError> {
    let invalid = || LeaveValidationError::InvalidDateRange { start, end };
    let elapsed = end.signed_duration_since(start).num_days();
    if elapsed < 0 {
        return Err(invalid());
    }
    u32::try_from(elapsed + 1).map_err(|_| invalid())
}
