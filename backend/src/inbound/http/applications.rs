//! Leave application handlers.
//!
//! ```text
//! POST   /api/v1/applications
//! GET    /api/v1/applications
//! GET    /api/v1/applications/{id}
//! PATCH  /api/v1/applications/{id}
//! DELETE /api/v1/applications/{id}
//! GET    /api/v1/subordinate-applications
//! ```
//!
//! The applicant is always the session user. Object-level access is decided
//! by the domain services; these handlers only parse and shape payloads.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::leave::{
    LeaveApplication, LeaveApplicationEdit, LeaveDateRange, LeaveReason, LeaveStatus, LeaveType,
    LeaveValidationError,
};
use crate::domain::ports::{LeaveSubmission, SubordinateApplication};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::UserResponse;
use crate::inbound::http::validation::{parse_application_id, parse_user_id};

/// Submission body for `POST /api/v1/applications`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LeaveApplicationRequest {
    /// Id of the approving manager.
    #[schema(format = Uuid)]
    pub manager: String,
    #[schema(example = "Vacation")]
    pub leave_type: String,
    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2024-01-05")]
    pub end_date: NaiveDate,
    pub reason: String,
}

impl TryFrom<LeaveApplicationRequest> for LeaveSubmission {
    type Error = Error;

    fn try_from(value: LeaveApplicationRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            manager: parse_user_id(&value.manager, "manager")?,
            leave_type: LeaveType::new(&value.leave_type)?,
            dates: LeaveDateRange::new(value.start_date, value.end_date)?,
            reason: LeaveReason::new(&value.reason)?,
        })
    }
}

/// Manager edit body for `PATCH /api/v1/applications/{id}`. Absent fields
/// are kept.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LeaveApplicationPatch {
    #[serde(default)]
    pub leave_type: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub reason: Option<String>,
    /// One of `Pending`, `Approved`, `Rejected`.
    #[serde(default)]
    #[schema(example = "Approved")]
    pub status: Option<String>,
}

impl TryFrom<LeaveApplicationPatch> for LeaveApplicationEdit {
    type Error = Error;

    fn try_from(value: LeaveApplicationPatch) -> Result<Self, Self::Error> {
        let status = value
            .status
            .map(|label| label.parse::<LeaveStatus>().map_err(LeaveValidationError::from))
            .transpose()?;
        Ok(Self {
            leave_type: value.leave_type.map(LeaveType::new).transpose()?,
            start_date: value.start_date,
            end_date: value.end_date,
            reason: value.reason.map(LeaveReason::new).transpose()?,
            status,
        })
    }
}

/// A leave application as returned to applicants and managers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LeaveApplicationResponse {
    #[schema(format = Uuid)]
    pub id: String,
    #[schema(format = Uuid)]
    pub applicant: String,
    #[schema(format = Uuid)]
    pub manager: String,
    pub leave_type: String,
    #[schema(value_type = String, format = Date)]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub end_date: NaiveDate,
    /// Inclusive number of days covered.
    pub day_span: u32,
    pub reason: String,
    pub status: LeaveStatus,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl From<&LeaveApplication> for LeaveApplicationResponse {
    fn from(application: &LeaveApplication) -> Self {
        let dates = application.dates();
        Self {
            id: application.id().to_string(),
            applicant: application.applicant().to_string(),
            manager: application.manager().to_string(),
            leave_type: application.leave_type().to_string(),
            start_date: dates.start(),
            end_date: dates.end(),
            day_span: dates.day_span(),
            reason: application.reason().as_ref().to_owned(),
            status: application.status(),
            created_at: application.created_at(),
        }
    }
}

/// A subordinate's application with the applicant's profile inlined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubordinateApplicationResponse {
    #[serde(flatten)]
    pub application: LeaveApplicationResponse,
    pub applicant_profile: UserResponse,
}

impl From<&SubordinateApplication> for SubordinateApplicationResponse {
    fn from(value: &SubordinateApplication) -> Self {
        Self {
            application: LeaveApplicationResponse::from(&value.application),
            applicant_profile: UserResponse::from(&value.applicant),
        }
    }
}

fn to_responses(applications: &[LeaveApplication]) -> Vec<LeaveApplicationResponse> {
    applications
        .iter()
        .map(LeaveApplicationResponse::from)
        .collect()
}

/// Submit a leave application as the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/applications",
    request_body = LeaveApplicationRequest,
    responses(
        (status = 201, description = "Application created", body = LeaveApplicationResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["applications"],
    operation_id = "submitApplication"
)]
#[post("/applications")]
pub async fn submit_application(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LeaveApplicationRequest>,
) -> ApiResult<HttpResponse> {
    let applicant = session.require_user_id()?;
    let submission = LeaveSubmission::try_from(payload.into_inner())?;
    let application = state.applications.submit(&applicant, submission).await?;
    Ok(HttpResponse::Created().json(LeaveApplicationResponse::from(&application)))
}

/// The signed-in user's own applications, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/applications",
    responses(
        (status = 200, description = "Own applications", body = [LeaveApplicationResponse]),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["applications"],
    operation_id = "listOwnApplications"
)]
#[get("/applications")]
pub async fn list_own_applications(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<LeaveApplicationResponse>>> {
    let actor = session.require_user_id()?;
    let applications = state.applications_query.list_own(&actor).await?;
    Ok(web::Json(to_responses(&applications)))
}

/// Fetch one application visible to the signed-in user.
#[utoipa::path(
    get,
    path = "/api/v1/applications/{id}",
    params(("id" = String, Path, description = "Application id (UUID)")),
    responses(
        (status = 200, description = "Application", body = LeaveApplicationResponse),
        (status = 400, description = "Malformed id", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Neither applicant nor manager", body = Error),
        (status = 404, description = "Unknown application", body = Error)
    ),
    tags = ["applications"],
    operation_id = "getApplication"
)]
#[get("/applications/{id}")]
pub async fn get_application(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<LeaveApplicationResponse>> {
    let actor = session.require_user_id()?;
    let id = parse_application_id(&path.into_inner())?;
    let application = state.applications_query.get(&actor, &id).await?;
    Ok(web::Json(LeaveApplicationResponse::from(&application)))
}

/// Approve, reject, or edit an application as its manager.
#[utoipa::path(
    patch,
    path = "/api/v1/applications/{id}",
    params(("id" = String, Path, description = "Application id (UUID)")),
    request_body = LeaveApplicationPatch,
    responses(
        (status = 200, description = "Updated application", body = LeaveApplicationResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Not the approving manager", body = Error),
        (status = 404, description = "Unknown application", body = Error)
    ),
    tags = ["applications"],
    operation_id = "updateApplication"
)]
#[patch("/applications/{id}")]
pub async fn update_application(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<LeaveApplicationPatch>,
) -> ApiResult<web::Json<LeaveApplicationResponse>> {
    let actor = session.require_user_id()?;
    let id = parse_application_id(&path.into_inner())?;
    let edit = LeaveApplicationEdit::try_from(payload.into_inner())?;
    let application = state.applications.update(&actor, &id, edit).await?;
    Ok(web::Json(LeaveApplicationResponse::from(&application)))
}

/// Withdraw an application as its applicant.
#[utoipa::path(
    delete,
    path = "/api/v1/applications/{id}",
    params(("id" = String, Path, description = "Application id (UUID)")),
    responses(
        (status = 204, description = "Application deleted"),
        (status = 400, description = "Malformed id", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Not the applicant", body = Error),
        (status = 404, description = "Unknown application", body = Error)
    ),
    tags = ["applications"],
    operation_id = "deleteApplication"
)]
#[delete("/applications/{id}")]
pub async fn delete_application(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let id = parse_application_id(&path.into_inner())?;
    state.applications.delete(&actor, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Applications naming the signed-in user as approving manager.
#[utoipa::path(
    get,
    path = "/api/v1/subordinate-applications",
    responses(
        (status = 200, description = "Subordinate applications", body = [SubordinateApplicationResponse]),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["applications"],
    operation_id = "listSubordinateApplications"
)]
#[get("/subordinate-applications")]
pub async fn list_subordinate_applications(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<SubordinateApplicationResponse>>> {
    let actor = session.require_user_id()?;
    let applications = state.applications_query.list_subordinate(&actor).await?;
    Ok(web::Json(
        applications
            .iter()
            .map(SubordinateApplicationResponse::from)
            .collect(),
    ))
}

#[cfg(test)]
#[path = "applications_tests.rs"]
mod tests;
