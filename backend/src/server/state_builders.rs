//! Composition of HTTP state from the configured persistence adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use leavedesk::domain::ports::{LeaveApplicationRepository, PasswordHasher, UserRepository};
use leavedesk::domain::{
    LeaveApplicationCommandService, LeaveApplicationQueryService, LeaveReportService,
    UserAccountService, UserLoginService, UsersQueryService,
};
use leavedesk::inbound::http::state::HttpState;
use leavedesk::outbound::memory::{InMemoryLeaveApplicationRepository, InMemoryUserRepository};
use leavedesk::outbound::persistence::{DieselLeaveApplicationRepository, DieselUserRepository};
use leavedesk::outbound::security::Argon2PasswordHasher;
use tracing::{info, warn};

use super::ServerConfig;

/// Wire every driving port over one pair of repositories.
fn services_over<U, L, H>(
    users: Arc<U>,
    applications: Arc<L>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    U: UserRepository + 'static,
    L: LeaveApplicationRepository + 'static,
    H: PasswordHasher + 'static,
{
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

/// Build handler state, using Diesel adapters when a pool is configured and
/// in-memory stores otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let hasher = Arc::new(Argon2PasswordHasher::new());
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL persistence");
            services_over(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselLeaveApplicationRepository::new(pool.clone())),
                hasher,
                clock,
            )
        }
        None => {
            warn!("no database configured; state is kept in memory and lost on restart");
            services_over(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryLeaveApplicationRepository::new()),
                hasher,
                clock,
            )
        }
    };
    web::Data::new(state)
}
