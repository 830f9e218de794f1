//! Curation: discover new tools and admit only genuinely new ones.
//!
//! Deduplication runs against an in-memory snapshot of existing names
//! taken by the caller at the start of the operation. Two concurrent
//! curator runs can therefore admit the same tool; acceptable for a
//! low-frequency admin operation, and the caller's upsert-by-id keeps
//! the write itself idempotent.

use std::collections::HashSet;

use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::json_span;
use crate::pipeline::prompts::format_curate_prompt;
use crate::pricing::PricingTier;
use crate::traits::Completer;
use crate::types::{CuratedCandidate, PlatformLink, ToolDraft};

/// How many candidates the curator asks for by default.
pub const DEFAULT_CURATE_COUNT: usize = 3;

/// Ask the completer for `want` new tools and keep the unknown ones.
///
/// `existing_names` must hold lowercase names. Fails atomically: a
/// malformed model response returns an error before any draft is built,
/// so the caller persists either the full accepted subset or nothing.
pub async fn curate_new_tools(
    completer: &dyn Completer,
    existing_names: &HashSet<String>,
    want: usize,
) -> Result<Vec<ToolDraft>> {
    let prompt = format_curate_prompt(existing_names, want);
    let raw = completer.complete(&prompt).await?;
    let candidates: Vec<CuratedCandidate> = json_span::extract_array(&raw)?;

    let mut accepted = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if existing_names.contains(&candidate.name.to_lowercase()) {
            debug!(name = %candidate.name, "skipping already-known tool");
            continue;
        }
        accepted.push(draft_from_candidate(candidate));
    }

    debug!(accepted = accepted.len(), "curation pass complete");
    Ok(accepted)
}

/// Build a draft from an accepted candidate.
///
/// Platform links derive from the candidate's `url` (web) and `repo`
/// (github) when present. Auto-discovered tools are never featured.
pub fn draft_from_candidate(candidate: CuratedCandidate) -> ToolDraft {
    let mut platforms = Vec::new();
    if let Some(url) = candidate.url.filter(|u| !u.trim().is_empty()) {
        platforms.push(PlatformLink::web(url));
    }
    if let Some(repo) = candidate.repo.filter(|r| !r.trim().is_empty()) {
        platforms.push(PlatformLink::github(repo));
    }

    ToolDraft {
        id: Uuid::new_v4(),
        name: candidate.name,
        description: candidate.description.unwrap_or_default(),
        tags: candidate.tags.unwrap_or_default(),
        pricing: candidate
            .pricing
            .as_deref()
            .and_then(|p| p.parse().ok())
            .unwrap_or(PricingTier::Paid),
        platforms,
        image: None,
        featured: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnrichmentError;
    use crate::testing::MockCompleter;
    use crate::types::PlatformKind;

    fn names(list: &[&str]) -> HashSet<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn test_known_names_are_rejected_case_insensitively() {
        let completer = MockCompleter::new().with_response(
            r#"Found these tools:
            [
                {"name": "Midjourney", "description": "Image gen", "tags": ["Image"],
                 "pricing": "Paid", "url": "https://midjourney.com"},
                {"name": "Runway Gen-3", "description": "Video gen", "tags": ["Video"],
                 "pricing": "Freemium", "url": "https://runwayml.com"}
            ]"#,
        );

        let accepted = curate_new_tools(&completer, &names(&["midjourney"]), 2)
            .await
            .unwrap();

        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].name, "Runway Gen-3");
    }

    #[tokio::test]
    async fn test_accepted_drafts_are_never_featured() {
        let completer = MockCompleter::new().with_response(
            r#"[{"name": "NewTool", "description": "d", "tags": [], "pricing": "Free",
                 "url": "https://new.dev", "repo": "https://github.com/new/tool"}]"#,
        );

        let accepted = curate_new_tools(&completer, &HashSet::new(), 1)
            .await
            .unwrap();

        assert_eq!(accepted.len(), 1);
        let draft = &accepted[0];
        assert!(!draft.featured);
        assert_eq!(draft.platforms.len(), 2);
        assert_eq!(draft.platforms[0].kind, PlatformKind::Web);
        assert_eq!(draft.platforms[1].kind, PlatformKind::Github);
        assert_eq!(draft.platforms[1].url, "https://github.com/new/tool");
    }

    #[tokio::test]
    async fn test_candidate_without_links_gets_empty_platforms() {
        let completer = MockCompleter::new()
            .with_response(r#"[{"name": "Mystery", "pricing": "Free"}]"#);

        let accepted = curate_new_tools(&completer, &HashSet::new(), 1)
            .await
            .unwrap();

        assert!(accepted[0].platforms.is_empty());
        assert_eq!(accepted[0].pricing, PricingTier::Free);
    }

    #[tokio::test]
    async fn test_garbage_response_fails_before_any_draft() {
        let completer =
            MockCompleter::new().with_response("I am unable to browse the web right now.");

        let err = curate_new_tools(&completer, &HashSet::new(), 3)
            .await
            .unwrap_err();

        assert!(matches!(err, EnrichmentError::NoStructuredDataFound));
    }

    #[tokio::test]
    async fn test_truncated_array_fails_atomically() {
        let completer = MockCompleter::new()
            .with_response(r#"[{"name": "A"}, {"name": "B""#);

        let err = curate_new_tools(&completer, &HashSet::new(), 2)
            .await
            .unwrap_err();

        assert!(matches!(err, EnrichmentError::NoStructuredDataFound));
    }

    #[tokio::test]
    async fn test_prompt_excludes_known_names_and_count() {
        let completer = MockCompleter::new().with_response("[]");

        let existing = names(&["cursor", "flux"]);
        let accepted = curate_new_tools(&completer, &existing, 5).await.unwrap();
        assert!(accepted.is_empty());

        let prompts = completer.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Find 5 top trending"));
        assert!(prompts[0].contains("cursor, flux"));
    }

    #[test]
    fn test_unknown_pricing_defaults_to_paid() {
        let draft = draft_from_candidate(CuratedCandidate {
            name: "T".into(),
            description: None,
            tags: None,
            pricing: Some("Contact sales".into()),
            url: None,
            repo: None,
        });
        assert_eq!(draft.pricing, PricingTier::Paid);
    }
}
