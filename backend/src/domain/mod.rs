//! Domain layer: entities, validation, ports, and the services implementing
//! the driving ports.
//!
//! Nothing here depends on actix or Diesel; adapters in `inbound` and
//! `outbound` translate to and from these types.

pub mod auth;
pub mod error;
pub mod leave;
pub mod ports;
pub mod trace_id;
pub mod user;

mod leave_service;
mod user_service;

pub use self::auth::{
    CredentialValidationError, LoginCredentials, PASSWORD_MIN, Password, PasswordHash,
};
pub use self::error::{DomainError as Error, ErrorCode};
pub use self::leave_service::{
    LeaveApplicationCommandService, LeaveApplicationQueryService, LeaveReportService,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DisplayName, EmailAddress, User, UserDraft, UserId, UserProfileUpdate, UserValidationError,
    Username,
};
pub use self::user_service::{UserAccountService, UserLoginService, UsersQueryService};
