//! PostgreSQL persistence adapters built on Diesel and `diesel-async`.

mod diesel_error_mapping;
mod diesel_leave_application_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use self::diesel_leave_application_repository::DieselLeaveApplicationRepository;
pub use self::diesel_user_repository::DieselUserRepository;
pub use self::migrations::{MigrationError, run_migrations};
pub use self::pool::{DbPool, PoolConfig, PoolError};
