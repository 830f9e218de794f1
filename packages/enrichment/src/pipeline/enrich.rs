//! URL analysis: scrape, classify, enrich, merge.
//!
//! Pure construction end to end. Persistence is a separate explicit
//! step performed by the caller.

use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::json_span;
use crate::pipeline::prompts::format_analyze_prompt;
use crate::pricing::{detect_pricing, PricingTier};
use crate::traits::{Completer, PageFetcher};
use crate::types::{
    AnalyzedTool, FieldProvenance, FieldSource, GeneratedFields, PageMetadata, PlatformLink,
    ScrapeSummary, ToolDraft,
};

/// Analyze a URL into a tool draft.
///
/// Scrapes the page, runs the pricing heuristic, asks the completer for
/// structured fields, then merges with a fixed precedence: generative
/// output, scraped metadata, heuristic pricing, hard defaults.
pub async fn analyze_tool(
    fetcher: &dyn PageFetcher,
    completer: &dyn Completer,
    url: &str,
) -> Result<AnalyzedTool> {
    debug!(url = %url, "analyzing tool page");

    let meta = fetcher.fetch(url).await?;
    let detected_pricing = detect_pricing(&meta.html_prefix, &meta.text_content);

    let prompt = format_analyze_prompt(&meta);
    let raw = completer.complete(&prompt).await?;
    let generated: GeneratedFields = json_span::extract_object(&raw)?;

    let analyzed = merge_record(url, &meta, detected_pricing, generated);
    debug!(url = %url, name = %analyzed.tool.name, "tool analysis complete");

    Ok(analyzed)
}

/// Merge generative, scraped, and heuristic signals into a draft.
///
/// Empty strings from the generative pass count as "no signal", same as
/// absence. Pricing always lands on one of the three tiers; the final
/// fallback is `Paid`.
pub fn merge_record(
    url: &str,
    meta: &PageMetadata,
    detected_pricing: Option<PricingTier>,
    generated: GeneratedFields,
) -> AnalyzedTool {
    let (name, name_source) = match non_empty(generated.name) {
        Some(name) => (name, FieldSource::Generated),
        None => match non_empty(meta.title.clone()) {
            Some(title) => (title, FieldSource::Scraped),
            None => ("Unknown Tool".to_string(), FieldSource::Default),
        },
    };

    let (description, description_source) = match non_empty(generated.description) {
        Some(description) => (description, FieldSource::Generated),
        None => match non_empty(meta.description.clone()) {
            Some(description) => (description, FieldSource::Scraped),
            None => (String::new(), FieldSource::Default),
        },
    };

    let (tags, tags_source) = match generated.tags {
        Some(tags) => (tags, FieldSource::Generated),
        None => (Vec::new(), FieldSource::Default),
    };

    // Unknown tier strings from the model count as absent.
    let generated_pricing: Option<PricingTier> =
        generated.pricing.as_deref().and_then(|p| p.parse().ok());
    let (pricing, pricing_source) = match generated_pricing {
        Some(pricing) => (pricing, FieldSource::Generated),
        None => match detected_pricing {
            Some(pricing) => (pricing, FieldSource::Heuristic),
            None => (PricingTier::Paid, FieldSource::Default),
        },
    };

    let (featured, featured_source) = match generated.featured {
        Some(featured) => (featured, FieldSource::Generated),
        None => (false, FieldSource::Default),
    };

    let tool = ToolDraft {
        id: Uuid::new_v4(),
        name,
        description,
        tags,
        pricing,
        platforms: vec![PlatformLink::web(url)],
        image: meta.og_image.clone(),
        featured,
    };

    AnalyzedTool {
        tool,
        provenance: FieldProvenance {
            name: name_source,
            description: description_source,
            tags: tags_source,
            pricing: pricing_source,
            featured: featured_source,
        },
        scraped: ScrapeSummary {
            scraped_title: meta.title.clone(),
            scraped_description: meta.description.clone(),
            detected_pricing,
            favicon: meta.favicon.clone(),
        },
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnrichmentError;
    use crate::testing::{MockCompleter, MockFetcher};

    fn rich_metadata() -> PageMetadata {
        PageMetadata::new("https://flux.dev")
            .with_title("Flux Playground")
            .with_description("A playground for Flux")
            .with_text_content("Generate stunning images. Free trial, then $9/month.")
            .with_html_prefix("<html><body>free trial $9</body></html>")
    }

    #[tokio::test]
    async fn test_generative_fields_win() {
        let fetcher = MockFetcher::new().with_page(rich_metadata());
        let completer = MockCompleter::new().with_response(
            r#"Here you go: {"name": "Flux.1", "description": "Fast image model",
                "tags": ["Image"], "pricing": "Freemium", "featured": true}"#,
        );

        let analyzed = analyze_tool(&fetcher, &completer, "https://flux.dev")
            .await
            .unwrap();

        assert_eq!(analyzed.tool.name, "Flux.1");
        assert_eq!(analyzed.tool.description, "Fast image model");
        assert_eq!(analyzed.tool.tags, vec!["Image"]);
        assert_eq!(analyzed.tool.pricing, PricingTier::Freemium);
        assert!(analyzed.tool.featured);
        assert_eq!(analyzed.provenance.name, FieldSource::Generated);
        assert_eq!(analyzed.tool.primary_url(), Some("https://flux.dev"));
    }

    #[tokio::test]
    async fn test_scraped_fallback_when_model_returns_empty_object() {
        let fetcher = MockFetcher::new().with_page(rich_metadata());
        let completer = MockCompleter::new().with_response("{}");

        let analyzed = analyze_tool(&fetcher, &completer, "https://flux.dev")
            .await
            .unwrap();

        assert_eq!(analyzed.tool.name, "Flux Playground");
        assert_eq!(analyzed.provenance.name, FieldSource::Scraped);
        assert_eq!(analyzed.tool.description, "A playground for Flux");
        // "free trial" plus "$" in page content
        assert_eq!(analyzed.tool.pricing, PricingTier::Freemium);
        assert_eq!(analyzed.provenance.pricing, FieldSource::Heuristic);
    }

    #[tokio::test]
    async fn test_hard_defaults_when_everything_is_silent() {
        let fetcher = MockFetcher::new().with_page(PageMetadata::new("https://bare.dev"));
        let completer = MockCompleter::new().with_response("{}");

        let analyzed = analyze_tool(&fetcher, &completer, "https://bare.dev")
            .await
            .unwrap();

        assert_eq!(analyzed.tool.name, "Unknown Tool");
        assert_eq!(analyzed.tool.description, "");
        assert!(analyzed.tool.tags.is_empty());
        assert_eq!(analyzed.tool.pricing, PricingTier::Paid);
        assert!(!analyzed.tool.featured);
        assert_eq!(analyzed.provenance.pricing, FieldSource::Default);
    }

    #[tokio::test]
    async fn test_empty_generated_strings_count_as_absent() {
        let fetcher = MockFetcher::new().with_page(rich_metadata());
        let completer =
            MockCompleter::new().with_response(r#"{"name": "", "description": "  "}"#);

        let analyzed = analyze_tool(&fetcher, &completer, "https://flux.dev")
            .await
            .unwrap();

        assert_eq!(analyzed.tool.name, "Flux Playground");
        assert_eq!(analyzed.tool.description, "A playground for Flux");
    }

    #[tokio::test]
    async fn test_unknown_pricing_string_falls_back() {
        let fetcher = MockFetcher::new().with_page(rich_metadata());
        let completer =
            MockCompleter::new().with_response(r#"{"name": "X", "pricing": "Enterprise"}"#);

        let analyzed = analyze_tool(&fetcher, &completer, "https://flux.dev")
            .await
            .unwrap();

        assert_eq!(analyzed.tool.pricing, PricingTier::Freemium);
        assert_eq!(analyzed.provenance.pricing, FieldSource::Heuristic);
    }

    #[tokio::test]
    async fn test_scrape_failure_propagates() {
        let fetcher = MockFetcher::new();
        let completer = MockCompleter::new();

        let err = analyze_tool(&fetcher, &completer, "https://down.dev")
            .await
            .unwrap_err();

        assert!(matches!(err, EnrichmentError::ScrapeFailed { .. }));
        assert_eq!(completer.call_count(), 0);
    }

    #[tokio::test]
    async fn test_prose_only_response_is_no_structured_data() {
        let fetcher = MockFetcher::new().with_page(rich_metadata());
        let completer =
            MockCompleter::new().with_response("I could not analyze this page, sorry.");

        let err = analyze_tool(&fetcher, &completer, "https://flux.dev")
            .await
            .unwrap_err();

        assert!(matches!(err, EnrichmentError::NoStructuredDataFound));
    }

    #[tokio::test]
    async fn test_completer_failure_propagates() {
        let fetcher = MockFetcher::new().with_page(rich_metadata());
        let completer = MockCompleter::new().with_failure("model unavailable");

        let err = analyze_tool(&fetcher, &completer, "https://flux.dev")
            .await
            .unwrap_err();

        assert!(matches!(err, EnrichmentError::EnrichmentFailed(_)));
    }

    #[test]
    fn test_each_draft_gets_a_fresh_id() {
        let meta = PageMetadata::new("https://x.dev");
        let a = merge_record("https://x.dev", &meta, None, GeneratedFields::default());
        let b = merge_record("https://x.dev", &meta, None, GeneratedFields::default());
        assert_ne!(a.tool.id, b.tool.id);
    }
}
