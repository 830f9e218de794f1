//! Vault domain: per-user saved generations, optionally shared by
//! flipping a public flag.

pub mod models;
pub mod routes;

pub use models::Generation;
