//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn trace_id() -> TraceId {
    TRACE_ID.parse().expect("fixture trace id is a valid UUID")
}

#[rstest]
#[case(DomainError::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(DomainError::unauthorized("who"), ErrorCode::Unauthorized)]
#[case(DomainError::forbidden("no"), ErrorCode::Forbidden)]
#[case(DomainError::not_found("gone"), ErrorCode::NotFound)]
#[case(DomainError::conflict("taken"), ErrorCode::Conflict)]
#[case(DomainError::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(DomainError::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] err: DomainError, #[case] expected: ErrorCode) {
    assert_eq!(err.code(), expected);
}

#[rstest]
fn trace_id_is_absent_outside_a_request() {
    let err = DomainError::internal("boom");
    assert!(err.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn trace_id_is_captured_in_scope(trace_id: TraceId) {
    let err = TraceId::scope(trace_id, async { DomainError::not_found("missing") }).await;
    assert_eq!(err.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn serialises_with_camel_case_keys() {
    let err = DomainError::invalid_request("bad")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "field": "start_date" }));

    let value = serde_json::to_value(&err).expect("error serialises");

    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["message"], "bad");
    assert_eq!(value["traceId"], TRACE_ID);
    assert_eq!(value["details"]["field"], "start_date");
}

#[rstest]
fn omits_empty_optional_fields() {
    let value = serde_json::to_value(DomainError::forbidden("no")).expect("error serialises");
    let object = value.as_object().expect("error serialises to an object");
    assert!(!object.contains_key("traceId"));
    assert!(!object.contains_key("details"));
}

#[rstest]
fn display_uses_message() {
    assert_eq!(DomainError::conflict("username taken").to_string(), "username taken");
}
