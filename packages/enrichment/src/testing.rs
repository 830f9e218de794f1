//! Mock implementations for testing.
//!
//! Scripted fakes for the two pipeline seams. Both record their calls
//! so tests can assert on prompts and fetch targets.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use crate::error::{EnrichmentError, Result};
use crate::traits::{Completer, PageFetcher};
use crate::types::PageMetadata;

enum MockReply {
    Text(String),
    Failure(String),
}

/// Scripted completer. Replies are consumed FIFO; an exhausted script
/// fails the call.
#[derive(Default)]
pub struct MockCompleter {
    replies: Arc<RwLock<VecDeque<MockReply>>>,
    prompts: Arc<RwLock<Vec<String>>>,
}

impl MockCompleter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful completion.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.replies
            .write()
            .unwrap()
            .push_back(MockReply::Text(text.into()));
        self
    }

    /// Queue a failing completion.
    pub fn with_failure(self, reason: impl Into<String>) -> Self {
        self.replies
            .write()
            .unwrap()
            .push_back(MockReply::Failure(reason.into()));
        self
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }

    /// Number of completion calls made.
    pub fn call_count(&self) -> usize {
        self.prompts.read().unwrap().len()
    }
}

impl Clone for MockCompleter {
    fn clone(&self) -> Self {
        Self {
            replies: Arc::clone(&self.replies),
            prompts: Arc::clone(&self.prompts),
        }
    }
}

#[async_trait]
impl Completer for MockCompleter {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.write().unwrap().push(prompt.to_string());

        match self.replies.write().unwrap().pop_front() {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Failure(reason)) => Err(EnrichmentError::EnrichmentFailed(reason)),
            None => Err(EnrichmentError::EnrichmentFailed(
                "mock completer script exhausted".into(),
            )),
        }
    }
}

/// Canned page fetcher keyed by URL. Unknown URLs fail with
/// `ScrapeFailed`, mirroring a dead link.
#[derive(Default)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, PageMetadata>>>,
    fetch_calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page, keyed by its URL.
    pub fn with_page(self, page: PageMetadata) -> Self {
        self.pages.write().unwrap().insert(page.url.clone(), page);
        self
    }

    /// URLs fetched so far.
    pub fn fetch_calls(&self) -> Vec<String> {
        self.fetch_calls.read().unwrap().clone()
    }

    pub fn fetch_call_count(&self) -> usize {
        self.fetch_calls.read().unwrap().len()
    }
}

impl Clone for MockFetcher {
    fn clone(&self) -> Self {
        Self {
            pages: Arc::clone(&self.pages),
            fetch_calls: Arc::clone(&self.fetch_calls),
        }
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<PageMetadata> {
        self.fetch_calls.write().unwrap().push(url.to_string());

        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| EnrichmentError::scrape(url, "no canned page for URL"))
    }
}
