//! HTTP inbound adapter exposing the REST API.

pub mod applications;
pub mod error;
pub mod health;
pub mod reports;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::{ApiResult, json_config};

/// Register every `/api/v1` handler on `cfg`.
///
/// `users/me` is registered ahead of `users/{id}` so the literal segment
/// wins.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(users::register)
        .service(users::list_users)
        .service(users::current_user)
        .service(users::update_current_user)
        .service(users::get_user)
        .service(users::sign_in)
        .service(users::sign_out)
        .service(applications::submit_application)
        .service(applications::list_own_applications)
        .service(applications::get_application)
        .service(applications::update_application)
        .service(applications::delete_application)
        .service(applications::list_subordinate_applications)
        .service(reports::total_leaves_report);
}
