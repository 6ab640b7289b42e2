//! Total-leaves report handler.
//!
//! ```text
//! GET /api/v1/total-leaves-report[?year=YYYY]
//! ```

use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::domain::Error;
use crate::domain::leave::LeaveReportRecord;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Response header carrying the year the report was computed for.
pub const REPORT_YEAR_HEADER: &str = "report-year";

/// Query string for the report. The year defaults to the current UTC year.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// Calendar year to report on, e.g. `2024`.
    #[param(example = "2024")]
    pub year: Option<String>,
}

impl ReportQuery {
    fn parse_year(&self) -> Result<Option<i32>, Error> {
        self.year
            .as_deref()
            .map(|raw| {
                raw.trim().parse::<i32>().map_err(|_| {
                    Error::invalid_request(format!("year must be an integer, got `{raw}`"))
                        .with_details(json!({ "field": "year", "code": "invalid_year" }))
                })
            })
            .transpose()
    }
}

/// Day totals per subordinate and leave type for the signed-in manager.
///
/// Rows are ordered by subordinate id, then leave type. A manager with no
/// applications in the year gets an empty array.
#[utoipa::path(
    get,
    path = "/api/v1/total-leaves-report",
    params(ReportQuery),
    responses(
        (status = 200, description = "Report rows", body = [LeaveReportRecord],
            headers(("report-year" = i32, description = "Year the report covers"))),
        (status = 400, description = "Non-integer year", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["reports"],
    operation_id = "totalLeavesReport"
)]
#[get("/total-leaves-report")]
pub async fn total_leaves_report(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ReportQuery>,
) -> ApiResult<HttpResponse> {
    let manager = session.require_user_id()?;
    let year = query.parse_year()?;
    let response = state.reports.total_leaves_report(&manager, year).await?;
    Ok(HttpResponse::Ok()
        .insert_header((REPORT_YEAR_HEADER, response.year.to_string()))
        .json(response.report.into_records()))
}
