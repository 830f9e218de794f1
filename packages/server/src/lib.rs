// Trakin.AI - API Core
//
// Backend API for the AI tools directory: a scrape-and-enrich pipeline
// that turns a URL into a structured catalog entry, generative studio
// endpoints (prompt architect, image deconstructor, trend feed), and
// user-scoped vault, activity history, and profile storage.
//
// Architecture follows domain-driven design: route handlers live in
// domains/*/routes.rs over sqlx models in domains/*/models.rs, with
// shared infrastructure in kernel/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
