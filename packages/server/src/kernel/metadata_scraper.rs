//! Metadata scraper - fetches a tool page and extracts what the
//! enrichment pipeline needs: title/description/keywords, Open Graph
//! image, favicon, a bounded HTML prefix, and boilerplate-stripped text.
//!
//! This implementation:
//! - Uses reqwest for HTTP requests (bounded 15s timeout)
//! - Uses scraper crate for HTML parsing
//!
//! Limitations:
//! - No JavaScript rendering (static HTML only)

use anyhow::{Context, Result};
use async_trait::async_trait;
use enrichment::{EnrichmentError, PageFetcher, PageMetadata};
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Identifies us to the sites we index.
pub const SCRAPER_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; TrakinAI/1.0; +https://trakinai.com)";

/// Upper bound on a single page fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// HTML prefix handed to the analysis prompt.
const HTML_PREFIX_CHARS: usize = 10_000;

/// Text content cap for AI analysis.
const TEXT_CONTENT_CHARS: usize = 5_000;

/// Metadata scraper using reqwest + scraper
pub struct MetadataScraper {
    client: reqwest::Client,
}

impl MetadataScraper {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(SCRAPER_USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Fetch raw HTML from a URL
    async fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("HTTP {} for {}", status, url);
        }

        response
            .text()
            .await
            .context("Failed to read response body")
    }

    /// First matching element's `content` attribute, trimmed and non-empty
    fn meta_content(document: &Html, selector_str: &str) -> Option<String> {
        let selector = Selector::parse(selector_str).ok()?;
        document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Page title: `<title>` text, falling back to `og:title`
    fn extract_title(document: &Html) -> Option<String> {
        let title_selector = Selector::parse("title").ok()?;
        document
            .select(&title_selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
            .or_else(|| Self::meta_content(document, r#"meta[property="og:title"]"#))
    }

    /// Description: standard meta tag first, then Open Graph
    fn extract_description(document: &Html) -> Option<String> {
        Self::meta_content(document, r#"meta[name="description"]"#)
            .or_else(|| Self::meta_content(document, r#"meta[property="og:description"]"#))
            .or_else(|| Self::meta_content(document, r#"meta[property="description"]"#))
    }

    /// Comma-separated keywords meta tag
    fn extract_keywords(document: &Html) -> Vec<String> {
        Self::meta_content(document, r#"meta[name="keywords"]"#)
            .map(|raw| {
                raw.split(',')
                    .map(|k| k.trim().to_string())
                    .filter(|k| !k.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Favicon href resolved absolute against the page origin.
    ///
    /// Falls back to `/favicon.ico` when no link tag is present.
    fn extract_favicon(document: &Html, base: &Url) -> Option<String> {
        let href = [r#"link[rel="icon"]"#, r#"link[rel="shortcut icon"]"#]
            .iter()
            .filter_map(|sel| Selector::parse(sel).ok())
            .filter_map(|sel| {
                document
                    .select(&sel)
                    .next()
                    .and_then(|el| el.value().attr("href"))
                    .map(str::to_string)
            })
            .find(|href| !href.is_empty())
            .unwrap_or_else(|| "/favicon.ico".to_string());

        if href.starts_with("http") {
            return Some(href);
        }
        base.join(&href).ok().map(|u| u.to_string())
    }

    /// Visible text for AI analysis: boilerplate stripped, main content
    /// preferred over body, whitespace collapsed, capped.
    fn extract_text(html: &str) -> String {
        let document = Html::parse_document(html);

        // Prefer dedicated content areas; selector lists match in document order
        let content_html = Selector::parse("main, article, .content, #content")
            .ok()
            .and_then(|sel| document.select(&sel).next().map(|el| el.html()))
            .or_else(|| {
                Selector::parse("body")
                    .ok()
                    .and_then(|sel| document.select(&sel).next().map(|el| el.html()))
            })
            .unwrap_or_else(|| document.html());

        let stripped = Self::remove_boilerplate(&content_html);

        let fragment = Html::parse_fragment(&stripped);
        let text = fragment.root_element().text().collect::<String>();

        truncate_chars(&collapse_whitespace(&text), TEXT_CONTENT_CHARS)
    }

    /// Remove non-content elements from an HTML string
    fn remove_boilerplate(html: &str) -> String {
        let document = Html::parse_document(html);
        let unwanted = ["script", "style", "nav", "footer", "header"];

        let mut result = html.to_string();
        for selector_str in unwanted {
            if let Ok(selector) = Selector::parse(selector_str) {
                for element in document.select(&selector) {
                    let element_html = element.html();
                    result = result.replace(&element_html, "");
                }
            }
        }

        result
    }

    /// Build page metadata from fetched HTML. Pure; the async path only fetches.
    fn parse_metadata(url: &Url, html: &str) -> PageMetadata {
        let document = Html::parse_document(html);

        let mut meta = PageMetadata::new(url.as_str());
        meta.title = Self::extract_title(&document);
        meta.description = Self::extract_description(&document);
        meta.keywords = Self::extract_keywords(&document);
        meta.og_image = Self::meta_content(&document, r#"meta[property="og:image"]"#);
        meta.favicon = Self::extract_favicon(&document, url);
        meta.html_prefix = truncate_chars(html, HTML_PREFIX_CHARS);
        meta.text_content = Self::extract_text(html);
        meta
    }
}

#[async_trait]
impl PageFetcher for MetadataScraper {
    async fn fetch(&self, url: &str) -> enrichment::Result<PageMetadata> {
        let parsed = Url::parse(url)
            .map_err(|e| EnrichmentError::scrape(url, format!("invalid URL: {}", e)))?;

        debug!(url = %parsed, "Scraping tool page");

        let html = self
            .fetch_html(parsed.as_str())
            .await
            .map_err(|e| EnrichmentError::scrape(url, e.to_string()))?;

        Ok(Self::parse_metadata(&parsed, &html))
    }
}

/// Truncate to at most `max_chars` characters (not bytes)
fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
