//! Activity history domain: per-user telemetry with a fixed type
//! whitelist. Server-side writes are best-effort; losing one never
//! fails the operation that produced it.

pub mod models;
pub mod routes;

pub use models::{ActivityEntry, VALID_ACTIVITY_TYPES};
