//! Domain-Agnostic Tool Enrichment Library
//!
//! Turns messy upstream signals (scraped pages, free-form model output,
//! keyword heuristics) into well-formed tool records, and discovers new
//! candidates while rejecting names already known.
//!
//! # Design Philosophy
//!
//! - Pure construction: the pipeline builds records, the caller persists
//! - Trait seams for every collaborator; no provider types leak in here
//! - Model output is hostile input: balanced-span scanning before JSON
//! - Every fallback is explicit and carries provenance
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::collections::HashSet;
//! use enrichment::{analyze_tool, curate_new_tools};
//!
//! // Analyze one URL into a draft (nothing is persisted)
//! let analyzed = analyze_tool(&fetcher, &completer, "https://flux.dev").await?;
//!
//! // Discover new tools, skipping known names
//! let existing: HashSet<String> = tool_names_lowercase();
//! let drafts = curate_new_tools(&completer, &existing, 3).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (Completer, PageFetcher)
//! - [`types`] - Drafts, metadata, provenance
//! - [`json_span`] - Balanced-bracket JSON extraction from model chatter
//! - [`pricing`] - Keyword pricing heuristics
//! - [`pipeline`] - Analysis and curation workflows
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod json_span;
pub mod pipeline;
pub mod pricing;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{EnrichmentError, Result};
pub use json_span::{extract_array, extract_object, find_balanced_span, JsonKind};
pub use pricing::{detect_pricing, PricingTier};
pub use traits::{Completer, PageFetcher};
pub use types::{
    AnalyzedTool, CuratedCandidate, FieldProvenance, FieldSource, GeneratedFields, PageMetadata,
    PlatformKind, PlatformLink, ScrapeSummary, ToolDraft,
};

// Re-export pipeline entry points
pub use pipeline::{
    analyze_tool, curate_new_tools, draft_from_candidate, format_analyze_prompt,
    format_curate_prompt, merge_record, DEFAULT_CURATE_COUNT,
};
