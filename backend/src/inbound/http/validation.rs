//! Shared request parsing helpers for HTTP handlers.

use serde::{Deserialize, Deserializer};
use serde_json::json;

use crate::domain::leave::LeaveApplicationId;
use crate::domain::{Error, UserId};

/// `invalid_request` naming a required field that was absent.
pub fn missing_field_error(field: &str) -> Error {
    Error::invalid_request(format!("{field} is required"))
        .with_details(json!({ "field": field, "code": "missing" }))
}

/// Parse a user id supplied in `field`.
pub fn parse_user_id(raw: &str, field: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| {
        Error::invalid_request(format!("{field} must be a valid UUID"))
            .with_details(json!({ "field": field, "code": "invalid_id" }))
    })
}

/// Parse a leave application id taken from the request path.
pub fn parse_application_id(raw: &str) -> Result<LeaveApplicationId, Error> {
    LeaveApplicationId::new(raw).map_err(|_| {
        Error::invalid_request("application id must be a valid UUID")
            .with_details(json!({ "field": "id", "code": "invalid_id" }))
    })
}

/// Distinguish an absent field (`None`) from an explicit `null`
/// (`Some(None)`). Pair with `#[serde(default)]`.
pub fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
