//! In-process adapters used when no database is configured and in tests.
//!
//! State lives behind `tokio::sync::RwLock`; nothing survives a restart.

mod leave_application_repository;
mod user_repository;

pub use self::leave_application_repository::InMemoryLeaveApplicationRepository;
pub use self::user_repository::InMemoryUserRepository;
