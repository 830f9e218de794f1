//! Profile domain: one row per auth-service user, created lazily.

pub mod models;
pub mod routes;

pub use models::Profile;
