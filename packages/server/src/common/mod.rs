// Common types and utilities shared across the application

pub mod admin;
pub mod errors;

pub use admin::{require_admin, ADMIN_SECRET_HEADER};
pub use errors::{ApiError, ApiResult};
