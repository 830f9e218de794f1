//! Data types shared by the enrichment pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::pricing::PricingTier;

/// Metadata extracted from a scraped page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Canonical URL that was fetched
    pub url: String,

    /// Page title (`<title>` falling back to `og:title`)
    pub title: Option<String>,

    /// Meta description (`description` falling back to `og:description`)
    pub description: Option<String>,

    /// Comma-split `meta[name=keywords]` entries, trimmed
    #[serde(default)]
    pub keywords: Vec<String>,

    /// `og:image` if present
    pub og_image: Option<String>,

    /// Favicon resolved to an absolute URL
    pub favicon: Option<String>,

    /// Raw HTML prefix (first 10 KB) for keyword heuristics
    #[serde(default)]
    pub html_prefix: String,

    /// Boilerplate-stripped text content, capped at 5000 chars
    #[serde(default)]
    pub text_content: String,
}

impl PageMetadata {
    /// Create metadata with only the URL populated.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            description: None,
            keywords: Vec::new(),
            og_image: None,
            favicon: None,
            html_prefix: String::new(),
            text_content: String::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_text_content(mut self, text: impl Into<String>) -> Self {
        self.text_content = text.into();
        self
    }

    pub fn with_html_prefix(mut self, html: impl Into<String>) -> Self {
        self.html_prefix = html.into();
        self
    }
}

/// Where a tool can be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    Web,
    Github,
    Huggingface,
    Other,
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformKind::Web => write!(f, "web"),
            PlatformKind::Github => write!(f, "github"),
            PlatformKind::Huggingface => write!(f, "huggingface"),
            PlatformKind::Other => write!(f, "other"),
        }
    }
}

impl FromStr for PlatformKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "web" => Ok(PlatformKind::Web),
            "github" => Ok(PlatformKind::Github),
            "huggingface" => Ok(PlatformKind::Huggingface),
            "other" => Ok(PlatformKind::Other),
            other => Err(format!("unknown platform kind: {}", other)),
        }
    }
}

/// A launch point for a tool. The first `web` entry is the primary link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformLink {
    /// Wire name is `type` for compatibility with stored records
    #[serde(rename = "type")]
    pub kind: PlatformKind,

    pub url: String,
}

impl PlatformLink {
    pub fn new(kind: PlatformKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
        }
    }

    pub fn web(url: impl Into<String>) -> Self {
        Self::new(PlatformKind::Web, url)
    }

    pub fn github(url: impl Into<String>) -> Self {
        Self::new(PlatformKind::Github, url)
    }
}

/// A fully constructed tool record, not yet persisted.
///
/// The identifier is assigned here at construction; `created_at` is the
/// persistence layer's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDraft {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub pricing: PricingTier,
    pub platforms: Vec<PlatformLink>,
    pub image: Option<String>,
    pub featured: bool,
}

impl ToolDraft {
    /// Primary web URL, when one exists.
    pub fn primary_url(&self) -> Option<&str> {
        self.platforms
            .iter()
            .find(|p| p.kind == PlatformKind::Web)
            .map(|p| p.url.as_str())
    }
}

/// Fields the generative pass may supply. All optional: the merger
/// treats absence as "no signal".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeneratedFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    /// Kept as text: models occasionally invent tiers, which the merger
    /// treats the same as absent.
    pub pricing: Option<String>,
    pub featured: Option<bool>,
}

/// A curation candidate as the model describes it.
#[derive(Debug, Clone, Deserialize)]
pub struct CuratedCandidate {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub tags: Option<Vec<String>>,

    #[serde(default)]
    pub pricing: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub repo: Option<String>,
}

/// Which upstream signal supplied a merged field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldSource {
    /// The generative pass supplied a usable value
    Generated,
    /// Fell back to scraped metadata
    Scraped,
    /// Fell back to the keyword heuristic
    Heuristic,
    /// Hard default
    Default,
}

/// Per-field provenance of a merged draft.
#[derive(Debug, Clone, Serialize)]
pub struct FieldProvenance {
    pub name: FieldSource,
    pub description: FieldSource,
    pub tags: FieldSource,
    pub pricing: FieldSource,
    pub featured: FieldSource,
}

/// Scrape-side summary echoed alongside an analyzed draft.
///
/// Serialized camelCase: this struct is returned verbatim in API
/// responses as the `metadata` block.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeSummary {
    pub scraped_title: Option<String>,
    pub scraped_description: Option<String>,
    pub detected_pricing: Option<PricingTier>,
    pub favicon: Option<String>,
}

/// Result of analyzing a URL: the draft plus how it was assembled.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzedTool {
    pub tool: ToolDraft,
    pub provenance: FieldProvenance,
    pub scraped: ScrapeSummary,
}
