//! User account handlers.
//!
//! ```text
//! POST  /api/v1/users       {"username","email","name","password","manager"?}
//! GET   /api/v1/users
//! GET   /api/v1/users/me
//! PATCH /api/v1/users/me    {"name"?,"email"?,"manager"?}
//! GET   /api/v1/users/{id}
//! POST  /api/v1/signin      {"username","password"}
//! POST  /api/v1/signout
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::NewUserAccount;
use crate::domain::{
    DisplayName, EmailAddress, Error, LoginCredentials, Password, User, UserProfileUpdate,
    Username,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{deserialize_nullable, parse_user_id};

/// Public profile of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(format = Uuid)]
    pub id: String,
    pub username: String,
    pub email: String,
    pub name: String,
    #[schema(format = Uuid)]
    pub manager: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            email: user.email().to_string(),
            name: user.display_name().to_string(),
            manager: user.manager().map(|id| id.to_string()),
        }
    }
}

/// Registration body for `POST /api/v1/users`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub manager: Option<String>,
}

impl TryFrom<RegisterRequest> for NewUserAccount {
    type Error = Error;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            username: Username::new(&value.username)?,
            email: EmailAddress::new(&value.email)?,
            display_name: DisplayName::new(&value.name)?,
            password: Password::for_registration(&value.password)?,
            manager: value
                .manager
                .as_deref()
                .map(|raw| parse_user_id(raw, "manager"))
                .transpose()?,
        })
    }
}

/// Profile edit body for `PATCH /api/v1/users/me`. Absent fields are kept;
/// `"manager": null` clears the manager.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ProfileUpdateRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<String>, format = Uuid, nullable)]
    pub manager: Option<Option<String>>,
}

impl TryFrom<ProfileUpdateRequest> for UserProfileUpdate {
    type Error = Error;

    fn try_from(value: ProfileUpdateRequest) -> Result<Self, Self::Error> {
        let manager = match value.manager {
            None => None,
            Some(None) => Some(None),
            Some(Some(raw)) => Some(Some(parse_user_id(&raw, "manager")?)),
        };
        Ok(Self {
            email: value.email.map(EmailAddress::new).transpose()?,
            display_name: value.name.map(DisplayName::new).transpose()?,
            manager,
        })
    }
}

/// Sign-in body for `POST /api/v1/signin`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

/// Register a new user account.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username or email already taken", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let account = NewUserAccount::try_from(payload.into_inner())?;
    let user = state.accounts.register(account).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// List all users, ordered by username.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security([])
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users.iter().map(UserResponse::from).collect()))
}

/// Profile of the signed-in user.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = session.require_user_id()?;
    let user = state.users.get_user(&user_id).await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// Edit the signed-in user's name, email, or manager.
#[utoipa::path(
    patch,
    path = "/api/v1/users/me",
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 409, description = "Email already taken", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateCurrentUser"
)]
#[patch("/users/me")]
pub async fn update_current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileUpdateRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = session.require_user_id()?;
    let update = UserProfileUpdate::try_from(payload.into_inner())?;
    let user = state.accounts.update_profile(&user_id, update).await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// Fetch one user by id.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id (UUID)")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Malformed id", body = Error),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security([])
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = parse_user_id(&path.into_inner(), "id")?;
    let user = state.users.get_user(&user_id).await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// Verify credentials and start a cookie session.
#[utoipa::path(
    post,
    path = "/api/v1/signin",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["users"],
    operation_id = "signIn",
    security([])
)]
#[post("/signin")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignInRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let SignInRequest { username, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&username, &password)?;
    let user = state.login.authenticate(&credentials).await?;
    session.persist_user(&user.id())?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// End the session.
#[utoipa::path(
    post,
    path = "/api/v1/signout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "signOut",
    security([])
)]
#[post("/signout")]
pub async fn sign_out(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests;
