//! OpenAPI documentation for the REST API.
//!
//! [`ApiDoc`] collects every handler annotated with `utoipa::path` plus the
//! request and response schemas they reference. Swagger UI serves it in
//! debug builds and `openapi-dump` prints it for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::leave::{LeaveReportRecord, LeaveStatus};
use crate::domain::{Error, ErrorCode};
use crate::inbound::http::applications::{
    LeaveApplicationPatch, LeaveApplicationRequest, LeaveApplicationResponse,
    SubordinateApplicationResponse,
};
use crate::inbound::http::users::{
    ProfileUpdateRequest, RegisterRequest, SignInRequest, UserResponse,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/signin.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Leavedesk API",
        description = "Leave requests with manager approval and per-manager usage reports."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::update_current_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::sign_in,
        crate::inbound::http::users::sign_out,
        crate::inbound::http::applications::submit_application,
        crate::inbound::http::applications::list_own_applications,
        crate::inbound::http::applications::get_application,
        crate::inbound::http::applications::update_application,
        crate::inbound::http::applications::delete_application,
        crate::inbound::http::applications::list_subordinate_applications,
        crate::inbound::http::reports::total_leaves_report,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        UserResponse,
        RegisterRequest,
        ProfileUpdateRequest,
        SignInRequest,
        LeaveApplicationRequest,
        LeaveApplicationPatch,
        LeaveApplicationResponse,
        SubordinateApplicationResponse,
        LeaveStatus,
        LeaveReportRecord,
    )),
    tags(
        (name = "users", description = "Registration, sign-in, and profiles"),
        (name = "applications", description = "Leave applications and approvals"),
        (name = "reports", description = "Per-manager leave usage"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
