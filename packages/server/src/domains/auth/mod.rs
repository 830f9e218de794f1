//! Auth domain - session verification
//!
//! Sessions are minted by the hosted auth service (HS256). This server
//! verifies signature + issuer and otherwise treats the request as
//! anonymous. Admin mutations are gated separately by the
//! x-admin-secret header.

pub mod session;

pub use session::{SessionClaims, SessionService};
