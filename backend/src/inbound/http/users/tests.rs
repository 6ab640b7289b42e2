//! Handler tests for user accounts and sessions.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::inbound::http::test_utils::{in_memory_state, register, sign_in, test_app};

fn detail<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get("details").and_then(|d| d.get(key)).and_then(Value::as_str)
}

#[actix_web::test]
async fn registration_returns_profile_without_password() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({
            "username": "ada",
            "email": "Ada@Example.com",
            "name": "Ada Lovelace",
            "password": "correct horse",
        }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("email").and_then(Value::as_str), Some("ada@example.com"));
    assert_eq!(body.get("name").and_then(Value::as_str), Some("Ada Lovelace"));
    assert!(body.get("password").is_none());
    assert_eq!(body.get("manager"), Some(&Value::Null));
}

#[rstest]
#[case(json!({"username": "a", "email": "a@example.com", "name": "A", "password": "correct horse"}), "username")]
#[case(json!({"username": "ada", "email": "not-an-email", "name": "A", "password": "correct horse"}), "email")]
#[case(json!({"username": "ada", "email": "a@example.com", "name": "  ", "password": "correct horse"}), "name")]
#[case(json!({"username": "ada", "email": "a@example.com", "name": "A", "password": "short"}), "password")]
#[case(json!({"username": "ada", "email": "a@example.com", "name": "A", "password": "correct horse", "manager": "nope"}), "manager")]
#[actix_web::test]
async fn registration_validation_names_the_field(#[case] body: Value, #[case] field: &str) {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(body)
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("code").and_then(Value::as_str), Some("invalid_request"));
    assert_eq!(detail(&body, "field"), Some(field));
}

#[actix_web::test]
async fn duplicate_username_conflicts() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    register(&app, "ada", None).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({
            "username": "ada",
            "email": "other@example.com",
            "name": "Other",
            "password": "correct horse",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn unknown_manager_is_rejected() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({
            "username": "ada",
            "email": "ada@example.com",
            "name": "Ada",
            "password": "correct horse",
            "manager": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(detail(&body, "code"), Some("unknown_user"));
}

#[rstest]
#[case("ada", "wrong password")]
#[case("nobody", "correct horse")]
#[actix_web::test]
async fn sign_in_failures_are_uniform(#[case] username: &str, #[case] password: &str) {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    register(&app, "ada", None).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/signin")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("message").and_then(Value::as_str), Some("invalid credentials"));
}

#[actix_web::test]
async fn me_requires_a_session() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/users/me").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn me_returns_signed_in_user_and_signout_clears_it() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let ada = register(&app, "ada", None).await;
    let cookie = sign_in(&app, "ada").await;

    let me = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/me")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(me.status(), StatusCode::OK);
    let body: UserResponse = actix_test::read_body_json(me).await;
    assert_eq!(body, ada);

    let signout = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/signout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(signout.status(), StatusCode::NO_CONTENT);
    let cleared = signout
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("removal cookie")
        .into_owned();

    let after = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/me")
            .cookie(cleared)
            .to_request(),
    )
    .await;
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn profile_update_sets_and_clears_manager() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let boss = register(&app, "boss", None).await;
    register(&app, "ada", None).await;
    let cookie = sign_in(&app, "ada").await;

    let set = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri("/api/v1/users/me")
            .cookie(cookie.clone())
            .set_json(json!({ "manager": boss.id, "name": "Ada L." }))
            .to_request(),
    )
    .await;
    assert_eq!(set.status(), StatusCode::OK);
    let body: UserResponse = actix_test::read_body_json(set).await;
    assert_eq!(body.manager.as_deref(), Some(boss.id.as_str()));
    assert_eq!(body.name, "Ada L.");

    let cleared = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri("/api/v1/users/me")
            .cookie(cookie)
            .set_json(json!({ "manager": null }))
            .to_request(),
    )
    .await;
    let body: UserResponse = actix_test::read_body_json(cleared).await;
    assert!(body.manager.is_none());
    assert_eq!(body.name, "Ada L.");
}

#[actix_web::test]
async fn self_management_is_rejected() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let ada = register(&app, "ada", None).await;
    let cookie = sign_in(&app, "ada").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri("/api/v1/users/me")
            .cookie(cookie)
            .set_json(json!({ "manager": ada.id }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(detail(&body, "code"), Some("self_managed"));
}

#[rstest]
#[case("not-a-uuid", StatusCode::BAD_REQUEST)]
#[case("3fa85f64-5717-4562-b3fc-2c963f66afa6", StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn get_user_rejects_bad_or_unknown_ids(#[case] id: &str, #[case] expected: StatusCode) {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/users/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), expected);
}

#[actix_web::test]
async fn list_users_is_public_and_sorted() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    register(&app, "carol", None).await;
    register(&app, "alice", None).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/users").to_request(),
    )
    .await;
    let users: Vec<UserResponse> = actix_test::read_body_json(response).await;
    let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, ["alice", "carol"]);
}
