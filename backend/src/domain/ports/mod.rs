//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (repositories, hashing) are implemented by `outbound`
//! adapters; driving ports are implemented by domain services and called by
//! `inbound` adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod leave_application_command;
mod leave_application_query;
mod leave_application_repository;
mod leave_report_query;
mod login_service;
mod password_hasher;
mod user_accounts;
mod user_repository;
mod users_query;

pub use leave_application_command::{LeaveApplicationCommand, LeaveSubmission};
pub use leave_application_query::{LeaveApplicationQuery, SubordinateApplication};
#[cfg(test)]
pub use leave_application_repository::MockLeaveApplicationRepository;
pub use leave_application_repository::{
    LeaveApplicationRepository, LeaveApplicationRepositoryError,
};
pub use leave_report_query::{LeaveReportQuery, LeaveReportResponse};
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
pub use user_accounts::{NewUserAccount, UserAccounts};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{StoredCredentials, UserRepository, UserRepositoryError};
pub use users_query::UsersQuery;
