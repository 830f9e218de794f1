//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod gemini;
pub mod metadata_scraper;
pub mod test_dependencies;
pub mod traits;

// Model constants live next to the Gemini client
pub use gemini::{GeminiAI, GEMINI_FLASH, GEMINI_FLASH_EXP, GEMINI_FLASH_STABLE};

pub use deps::{CompleterAdapter, ServerDeps};
pub use metadata_scraper::{MetadataScraper, SCRAPER_USER_AGENT};
pub use test_dependencies::MockGenerativeAI;
pub use traits::*;
