//! Tool directory domain: the records the whole product serves, and the
//! enrichment/curation workflows that feed them.

pub mod models;
pub mod routes;

pub use models::Tool;
