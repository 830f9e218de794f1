// TestDependencies - mock implementations for testing
//
// Provides a mock generative model that can be injected into ServerDeps
// for tests. Lives outside #[cfg(test)] so integration tests can use it.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::BaseGenerativeAI;

// =============================================================================
// Mock Generative AI
// =============================================================================

/// Arguments captured from a describe_image call
#[derive(Debug, Clone)]
pub struct VisionCallArgs {
    pub prompt: String,
    pub mime_type: String,
    pub base64_data: String,
}

/// Scripted replies per operation; each call drains one. An `Err` entry
/// makes that call fail with the given reason.
pub struct MockGenerativeAI {
    completions: Arc<Mutex<Vec<Result<String, String>>>>,
    search_completions: Arc<Mutex<Vec<Result<String, String>>>>,
    vision_replies: Arc<Mutex<Vec<Result<String, String>>>>,
    complete_calls: Arc<Mutex<Vec<String>>>,
    search_calls: Arc<Mutex<Vec<String>>>,
    vision_calls: Arc<Mutex<Vec<VisionCallArgs>>>,
}

impl MockGenerativeAI {
    pub fn new() -> Self {
        Self {
            completions: Arc::new(Mutex::new(Vec::new())),
            search_completions: Arc::new(Mutex::new(Vec::new())),
            vision_replies: Arc::new(Mutex::new(Vec::new())),
            complete_calls: Arc::new(Mutex::new(Vec::new())),
            search_calls: Arc::new(Mutex::new(Vec::new())),
            vision_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a plain completion reply
    pub fn with_completion(self, text: &str) -> Self {
        self.completions.lock().unwrap().push(Ok(text.to_string()));
        self
    }

    /// Queue a plain completion failure
    pub fn with_completion_error(self, reason: &str) -> Self {
        self.completions
            .lock()
            .unwrap()
            .push(Err(reason.to_string()));
        self
    }

    /// Queue a search-grounded completion reply
    pub fn with_search_completion(self, text: &str) -> Self {
        self.search_completions
            .lock()
            .unwrap()
            .push(Ok(text.to_string()));
        self
    }

    /// Queue a search-grounded completion failure
    pub fn with_search_completion_error(self, reason: &str) -> Self {
        self.search_completions
            .lock()
            .unwrap()
            .push(Err(reason.to_string()));
        self
    }

    /// Queue an image description reply
    pub fn with_vision_reply(self, text: &str) -> Self {
        self.vision_replies
            .lock()
            .unwrap()
            .push(Ok(text.to_string()));
        self
    }

    /// Queue an image description failure
    pub fn with_vision_error(self, reason: &str) -> Self {
        self.vision_replies
            .lock()
            .unwrap()
            .push(Err(reason.to_string()));
        self
    }

    /// Get all plain completion prompts
    pub fn complete_calls(&self) -> Vec<String> {
        self.complete_calls.lock().unwrap().clone()
    }

    /// Get all search-grounded prompts
    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    /// Get all vision calls with their arguments
    pub fn vision_calls(&self) -> Vec<VisionCallArgs> {
        self.vision_calls.lock().unwrap().clone()
    }

    /// Check if any recorded prompt contains the given text
    pub fn was_prompted(&self, needle: &str) -> bool {
        let check = |calls: &Mutex<Vec<String>>| {
            calls.lock().unwrap().iter().any(|p| p.contains(needle))
        };
        check(&self.complete_calls)
            || check(&self.search_calls)
            || self
                .vision_calls
                .lock()
                .unwrap()
                .iter()
                .any(|c| c.prompt.contains(needle))
    }
}

fn next_reply(queue: &Mutex<Vec<Result<String, String>>>, canned: &str) -> Result<String> {
    let mut replies = queue.lock().unwrap();
    if !replies.is_empty() {
        replies
            .remove(0)
            .map_err(|reason| anyhow::anyhow!("{}", reason))
    } else {
        Ok(canned.to_string())
    }
}

#[async_trait]
impl BaseGenerativeAI for MockGenerativeAI {
    async fn complete(&self, prompt: &str) -> Result<String> {
        // Record the call
        self.complete_calls.lock().unwrap().push(prompt.to_string());
        next_reply(&self.completions, "Mock completion.")
    }

    async fn complete_with_search(&self, prompt: &str) -> Result<String> {
        self.search_calls.lock().unwrap().push(prompt.to_string());
        next_reply(&self.search_completions, "Mock grounded completion.")
    }

    async fn describe_image(
        &self,
        prompt: &str,
        mime_type: &str,
        base64_data: &str,
    ) -> Result<String> {
        self.vision_calls.lock().unwrap().push(VisionCallArgs {
            prompt: prompt.to_string(),
            mime_type: mime_type.to_string(),
            base64_data: base64_data.to_string(),
        });
        next_reply(&self.vision_replies, "Mock image prompt.")
    }
}
