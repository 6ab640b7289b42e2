//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use argon2::Params;
use mockable::DefaultClock;
use serde_json::json;

use crate::domain::{
    LeaveApplicationCommandService, LeaveApplicationQueryService, LeaveReportService,
    UserAccountService, UserLoginService, UsersQueryService,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::UserResponse;
use crate::outbound::memory::{InMemoryLeaveApplicationRepository, InMemoryUserRepository};
use crate::outbound::security::Argon2PasswordHasher;

/// Session middleware with a fresh key and insecure cookies for plain HTTP.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state backed by fresh in-memory stores and a cheap hasher.
pub fn in_memory_state() -> HttpState {
    let users = Arc::new(InMemoryUserRepository::new());
    let applications = Arc::new(InMemoryLeaveApplicationRepository::new());
    let params = Params::new(Params::MIN_M_COST, 1, 1, None).expect("valid argon2 params");
    let hasher = Arc::new(Argon2PasswordHasher::with_params(params));
    let clock = Arc::new(DefaultClock);

    HttpState {
        login: Arc::new(UserLoginService::new(users.clone(), hasher.clone())),
        accounts: Arc::new(UserAccountService::new(users.clone(), hasher)),
        users: Arc::new(UsersQueryService::new(users.clone())),
        applications: Arc::new(LeaveApplicationCommandService::new(
            applications.clone(),
            users.clone(),
            clock.clone(),
        )),
        applications_query: Arc::new(LeaveApplicationQueryService::new(
            applications.clone(),
            users.clone(),
        )),
        reports: Arc::new(LeaveReportService::new(applications, users, clock)),
    }
}

/// Full API under `/api/v1` with session support.
pub fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api/v1")
            .wrap(test_session_middleware())
            .configure(super::configure),
    )
}

/// Register `username` (optionally reporting to `manager`) and return its
/// profile.
pub async fn register<S>(app: &S, username: &str, manager: Option<&str>) -> UserResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "name": format!("{username} display"),
            "password": "correct horse",
            "manager": manager,
        }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(response.status().is_success(), "registration of {username} failed");
    actix_test::read_body_json(response).await
}

/// Sign in as `username` and return the session cookie.
pub async fn sign_in<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/signin")
        .set_json(json!({ "username": username, "password": "correct horse" }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(response.status().is_success(), "sign-in of {username} failed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}
