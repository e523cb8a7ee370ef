//! Stub generators and search providers for crate-internal tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::{GenerateRequest, TextGenerator};
use crate::error::{AgentError, Result};
use crate::search::{SearchProvider, SearchResult};

/// Text generator returning a canned response (or error), recording the
/// prompts it was called with.
pub(crate) struct StubGenerator {
    response: std::result::Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    /// A stub that always returns `text`.
    pub fn returning(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A stub that always fails with a provider error.
    pub fn failing(body: impl Into<String>) -> Self {
        Self {
            response: Err(body.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// The prompt from the most recent call.
    pub fn last_prompt(&self) -> String {
        self.prompts
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("generator was never called")
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, request: &GenerateRequest) -> Result<String> {
        self.prompts.lock().unwrap().push(request.prompt.clone());
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(body) => Err(AgentError::Provider {
                provider: "stub".to_string(),
                status: 500,
                body: body.clone(),
            }),
        }
    }
}

/// Search provider returning a fixed result list.
pub(crate) struct StubSearch {
    results: Vec<SearchResult>,
}

impl StubSearch {
    /// A stub returning one fixed result.
    pub fn with_result(title: &str, snippet: &str, url: &str) -> Self {
        Self {
            results: vec![SearchResult {
                title: title.to_string(),
                snippet: snippet.to_string(),
                url: url.to_string(),
                source: "Stub".to_string(),
            }],
        }
    }
}

#[async_trait]
impl SearchProvider for StubSearch {
    async fn search(&self, _query: &str) -> Vec<SearchResult> {
        self.results.clone()
    }
}
