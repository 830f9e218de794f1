//! Studio domain: the end-user generation features (architect,
//! deconstructor, runway feed). No storage of its own; results land in
//! the vault only when the user explicitly saves them.

pub mod prompts;
pub mod routes;

pub use routes::RunwayConcept;
