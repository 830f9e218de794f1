// Common test utilities

pub mod harness;
pub mod requests;

pub use harness::*;
pub use requests::*;
