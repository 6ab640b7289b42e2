//! Shared harness for HTTP integration tests.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use argon2::Params;
use leavedesk::Trace;
use leavedesk::domain::{
    LeaveApplicationCommandService, LeaveApplicationQueryService, LeaveReportService,
    UserAccountService, UserLoginService, UsersQueryService,
};
use leavedesk::inbound::http::configure;
use leavedesk::inbound::http::state::HttpState;
use leavedesk::outbound::memory::{InMemoryLeaveApplicationRepository, InMemoryUserRepository};
use leavedesk::outbound::security::Argon2PasswordHasher;
use mockable::DefaultClock;
use serde_json::{Value, json};

pub const PASSWORD: &str = "correct horse";

/// Handler state over fresh in-memory stores with a cheap hasher.
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

/// The API as the server mounts it, minus TLS-only cookie flags.
pub fn app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    App::new()
        .app_data(web::Data::new(in_memory_state()))
        .wrap(Trace)
        .service(web::scope("/api/v1").wrap(session).configure(configure))
}

/// Register `username` and return the JSON profile.
pub async fn register<S>(app: &S, username: &str) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "name": format!("{username} display"),
            "password": PASSWORD,
        }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status().as_u16(), 201, "register {username}");
    actix_test::read_body_json(response).await
}

/// Sign in and return the session cookie.
pub async fn sign_in<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/signin")
        .set_json(json!({ "username": username, "password": PASSWORD }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(response.status().is_success(), "sign in {username}");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

/// String field of a JSON object.
pub fn text<'a>(value: &'a Value, key: &str) -> &'a str {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("missing string field {key} in {value}"))
}
