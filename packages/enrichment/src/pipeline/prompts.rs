//! LLM prompts for the enrichment pipeline.
//!
//! Both prompts demand strict JSON, but models pad their answers with
//! prose anyway; callers pass the raw output through
//! [`crate::json_span`] rather than trusting the format.

use std::collections::HashSet;

use crate::types::PageMetadata;

/// Longest content preview embedded in the analysis prompt.
const CONTENT_PREVIEW_CHARS: usize = 2000;

/// Prompt for analyzing a scraped tool page into structured fields.
pub const ANALYZE_TOOL_PROMPT: &str = r#"Analyze this AI tool website and provide structured information:

URL: {url}
Title: {title}
Description: {description}
Keywords: {keywords}

Content Preview:
{content}

Extract:
1. Tool Name (clean, official name)
2. Concise Description (2-3 sentences, punchy, highlight key features)
3. Tags (3-5 relevant tags like "Image", "Video", "3D", "LLM", "Coding", "Agent", "Real-time", etc.)
4. Pricing Model (Free/Freemium/Paid)
5. Is this a Featured/Trending tool? (true/false)

OUTPUT STRICT JSON:
{
  "name": "...",
  "description": "...",
  "tags": ["...", "..."],
  "pricing": "Free" | "Freemium" | "Paid",
  "featured": true | false
}"#;

/// Prompt for discovering new trending tools, excluding known names.
pub const CURATE_PROMPT: &str = r#"Find {count} top trending AI tools released or updated heavily in late 2025 or 2026.
Exclude these already known tools: {known_names}.
Focus on: 3D Generation, Agents, Video, or Coding.

OUTPUT FORMAT:
Strict JSON array of objects fitting this schema:
{
    "name": "Tool Name",
    "description": "Short punchy description (max 100 chars)",
    "tags": ["Tag1", "Tag2"],
    "pricing": "Free" | "Freemium" | "Paid",
    "url": "Project Website URL",
    "repo": "GitHub URL (optional)"
}"#;

/// Format the analysis prompt from scraped metadata.
pub fn format_analyze_prompt(meta: &PageMetadata) -> String {
    ANALYZE_TOOL_PROMPT
        .replace("{url}", &meta.url)
        .replace("{title}", meta.title.as_deref().unwrap_or(""))
        .replace("{description}", meta.description.as_deref().unwrap_or(""))
        .replace("{keywords}", &meta.keywords.join(", "))
        .replace("{content}", &truncate_chars(&meta.text_content, CONTENT_PREVIEW_CHARS))
}

/// Format the curation prompt from the known-name snapshot.
///
/// Names are sorted so the prompt is stable for a given snapshot.
pub fn format_curate_prompt(existing_names: &HashSet<String>, count: usize) -> String {
    let mut names: Vec<&str> = existing_names.iter().map(String::as_str).collect();
    names.sort_unstable();

    CURATE_PROMPT
        .replace("{count}", &count.to_string())
        .replace("{known_names}", &names.join(", "))
}

/// Truncate to at most `max_chars` characters (not bytes).
fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
