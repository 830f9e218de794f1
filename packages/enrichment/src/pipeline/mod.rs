//! Enrichment pipeline: analysis and curation over the trait seams.

pub mod curate;
pub mod enrich;
pub mod prompts;

pub use curate::{curate_new_tools, draft_from_candidate, DEFAULT_CURATE_COUNT};
pub use enrich::{analyze_tool, merge_record};
pub use prompts::{format_analyze_prompt, format_curate_prompt};
