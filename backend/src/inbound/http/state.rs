//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on driving
//! ports, so they can be exercised without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LeaveApplicationCommand, LeaveApplicationQuery, LeaveReportQuery, LoginService, UserAccounts,
    UsersQuery,
};

/// Port implementations used by the handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub accounts: Arc<dyn UserAccounts>,
    pub users: Arc<dyn UsersQuery>,
    pub applications: Arc<dyn LeaveApplicationCommand>,
    pub applications_query: Arc<dyn LeaveApplicationQuery>,
    pub reports: Arc<dyn LeaveReportQuery>,
}
