//! Web search tool for the judge's research phase.
//!
//! Search is best-effort by contract: every failure path degrades to a
//! single-element fallback result, so callers never need error
//! branches. Three backends are supported; DuckDuckGo needs no key.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ApiKeys;

/// DuckDuckGo instant answer endpoint.
const DUCKDUCKGO_API_URL: &str = "https://api.duckduckgo.com/";

/// Tavily search endpoint.
const TAVILY_API_URL: &str = "https://api.tavily.com/search";

/// SerpAPI search endpoint.
const SERPAPI_URL: &str = "https://serpapi.com/search";

/// One search hit, normalized across backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result title.
    pub title: String,
    /// Short summary of the result.
    pub snippet: String,
    /// Link to the source.
    pub url: String,
    /// Which backend produced the result.
    pub source: String,
}

/// Search backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchBackend {
    /// DuckDuckGo instant answers (no API key required).
    #[default]
    DuckDuckGo,
    /// Tavily search API.
    Tavily,
    /// SerpAPI (Google results).
    SerpApi,
}

impl std::fmt::Display for SearchBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuckDuckGo => write!(f, "duckduckgo"),
            Self::Tavily => write!(f, "tavily"),
            Self::SerpApi => write!(f, "serpapi"),
        }
    }
}

/// Web search configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Backend to query.
    #[serde(default, alias = "provider")]
    pub backend: SearchBackend,

    /// Maximum results returned per query.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Request timeout, in seconds.
    #[serde(default = "default_timeout", alias = "timeout")]
    pub timeout_secs: u64,
}

fn default_max_results() -> usize {
    5
}

fn default_timeout() -> u64 {
    30
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            backend: SearchBackend::default(),
            max_results: default_max_results(),
            timeout_secs: default_timeout(),
        }
    }
}

/// The search seam: anything that can answer a query with results.
///
/// Infallible by contract; implementations return a fallback list
/// rather than erroring.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Searches the web for the query.
    async fn search(&self, query: &str) -> Vec<SearchResult>;
}

/// HTTP-backed web search supporting multiple backends.
pub struct WebSearchTool {
    http: reqwest::Client,
    config: SearchConfig,
    api_keys: ApiKeys,
}

impl WebSearchTool {
    /// Creates a search tool with the given configuration and keys.
    pub fn new(config: SearchConfig, api_keys: ApiKeys) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        debug!(backend = %config.backend, "web search tool initialized");

        Self {
            http,
            config,
            api_keys,
        }
    }

    /// Single-element fallback used when a backend cannot be queried.
    fn fallback_results(query: &str) -> Vec<SearchResult> {
        vec![SearchResult {
            title: format!("Search topic: {}", query),
            snippet: format!(
                "Unable to retrieve web search results for '{}'. \
                 The debate will proceed with general knowledge.",
                query
            ),
            url: String::new(),
            source: "Fallback".to_string(),
        }]
    }

    async fn search_duckduckgo(&self, query: &str) -> Option<Vec<SearchResult>> {
        let response = self
            .http
            .get(DUCKDUCKGO_API_URL)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "DuckDuckGo returned non-success status");
            return None;
        }

        let body: DuckDuckGoResponse = response.json().await.ok()?;
        let mut results = Vec::new();

        if !body.abstract_text.is_empty() {
            results.push(SearchResult {
                title: if body.abstract_heading.is_empty() {
                    "DuckDuckGo Summary".to_string()
                } else {
                    body.abstract_heading
                },
                snippet: body.abstract_text,
                url: body.abstract_url,
                source: "DuckDuckGo".to_string(),
            });
        }

        for topic in body.related_topics {
            if results.len() >= self.config.max_results {
                break;
            }
            // Related topics mix plain entries with nested category
            // objects; only plain entries carry text.
            let (Some(text), Some(url)) = (
                topic.get("Text").and_then(|v| v.as_str()),
                topic.get("FirstURL").and_then(|v| v.as_str()),
            ) else {
                continue;
            };
            results.push(SearchResult {
                title: truncate_title(text),
                snippet: text.to_string(),
                url: url.to_string(),
                source: "DuckDuckGo".to_string(),
            });
        }

        if results.is_empty() {
            results.push(SearchResult {
                title: format!("Search results for: {}", query),
                snippet: format!(
                    "No specific results found for '{}'. This is a general search topic.",
                    query
                ),
                url: format!("https://duckduckgo.com/?q={}", urlencode(query)),
                source: "DuckDuckGo".to_string(),
            });
        }

        results.truncate(self.config.max_results);
        Some(results)
    }

    async fn search_tavily(&self, query: &str) -> Option<Vec<SearchResult>> {
        let api_key = self.api_keys.get("tavily_api_key")?;

        let payload = TavilyRequest {
            api_key: api_key.to_string(),
            query: query.to_string(),
            search_depth: "basic".to_string(),
            max_results: self.config.max_results,
        };

        let response = self
            .http
            .post(TAVILY_API_URL)
            .json(&payload)
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "Tavily returned non-success status");
            return None;
        }

        let body: TavilyResponse = response.json().await.ok()?;
        Some(
            body.results
                .into_iter()
                .map(|r| SearchResult {
                    title: r.title,
                    snippet: r.content,
                    url: r.url,
                    source: "Tavily".to_string(),
                })
                .collect(),
        )
    }

    async fn search_serpapi(&self, query: &str) -> Option<Vec<SearchResult>> {
        let api_key = self.api_keys.get("serpapi_key")?;
        let num = self.config.max_results.to_string();

        let response = self
            .http
            .get(SERPAPI_URL)
            .query(&[
                ("api_key", api_key),
                ("q", query),
                ("engine", "google"),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "SerpAPI returned non-success status");
            return None;
        }

        let body: SerpApiResponse = response.json().await.ok()?;
        Some(
            body.organic_results
                .into_iter()
                .map(|r| SearchResult {
                    title: r.title,
                    snippet: r.snippet,
                    url: r.link,
                    source: "Google (SerpAPI)".to_string(),
                })
                .collect(),
        )
    }
}

#[async_trait]
impl SearchProvider for WebSearchTool {
    async fn search(&self, query: &str) -> Vec<SearchResult> {
        debug!(backend = %self.config.backend, query, "searching");

        let results = match self.config.backend {
            SearchBackend::DuckDuckGo => self.search_duckduckgo(query).await,
            SearchBackend::Tavily => self.search_tavily(query).await,
            SearchBackend::SerpApi => self.search_serpapi(query).await,
        };

        match results {
            Some(results) if !results.is_empty() => results,
            _ => {
                warn!(backend = %self.config.backend, "search failed, using fallback results");
                Self::fallback_results(query)
            }
        }
    }
}

/// Truncates a related-topic text into a title, keeping char boundaries.
fn truncate_title(text: &str) -> String {
    const MAX: usize = 100;
    if text.chars().count() <= MAX {
        return text.to_string();
    }
    let truncated: String = text.chars().take(MAX).collect();
    format!("{}...", truncated)
}

/// Minimal percent-encoding for the fallback DuckDuckGo link.
fn urlencode(query: &str) -> String {
    query
        .chars()
        .map(|c| match c {
            ' ' => "+".to_string(),
            c if c.is_ascii_alphanumeric() || "-_.~".contains(c) => c.to_string(),
            c => {
                let mut buf = [0u8; 4];
                c.encode_utf8(&mut buf)
                    .bytes()
                    .map(|b| format!("%{:02X}", b))
                    .collect()
            }
        })
        .collect()
}

// DuckDuckGo wire types.

#[derive(Deserialize)]
struct DuckDuckGoResponse {
    #[serde(rename = "Abstract", default)]
    abstract_text: String,
    #[serde(rename = "Heading", default)]
    abstract_heading: String,
    #[serde(rename = "AbstractURL", default)]
    abstract_url: String,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<serde_json::Value>,
}

// Tavily wire types.

#[derive(Serialize)]
struct TavilyRequest {
    api_key: String,
    query: String,
    search_depth: String,
    max_results: usize,
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    url: String,
}

// SerpAPI wire types.

#[derive(Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<SerpApiResult>,
}

#[derive(Deserialize)]
struct SerpApiResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
}
