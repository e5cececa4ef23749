//! Web search through SerpAPI.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::{CacheStore, Memo};
use crate::config::{Config, SERPAPI};
use crate::error::{DeepSearchError, Result};
use crate::provider::http::{join_url, shared_client, status_to_error};
use crate::tools::{Tool, ToolArguments, ToolOutput, ToolParameters, ToText};

const DEFAULT_BASE_URL: &str = "https://serpapi.com";
const DEFAULT_ENGINE: &str = "google";
const MISSING_SNIPPET: &str = "<missing>";

/// One organic search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub content: String,
}

impl ToText for SearchResult {
    fn to_text(&self) -> String {
        format!(
            "<result>\n<title>{}</title>\n<url>{}</url>\n<content>{}</content>\n</result>",
            self.title, self.url, self.content
        )
    }
}

/// Hits for a single query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub results: Vec<SearchResult>,
}

impl SearchResults {
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            results: Vec::new(),
        }
    }
}

impl ToText for SearchResults {
    fn to_text(&self) -> String {
        if self.results.is_empty() {
            return format!(
                "<search_results>\n<query>{}</query>\n<results>NO RESULTS FOUND - TRY ANOTHER QUERY</results>\n</search_results>",
                self.query
            );
        }
        let body: Vec<String> = self.results.iter().map(ToText::to_text).collect();
        format!(
            "<search_results>\n<query>{}</query>\n{}\n</search_results>",
            self.query,
            body.join("\n")
        )
    }
}

/// Result sets for several queries, in query order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiSearchResults {
    pub results: Vec<SearchResults>,
}

impl ToText for MultiSearchResults {
    fn to_text(&self) -> String {
        let parts: Vec<String> = self.results.iter().map(ToText::to_text).collect();
        parts.join("\n\n")
    }
}

/// SerpAPI client, optionally memoizing each (query, engine) pair.
#[derive(Clone)]
pub struct SerpClient {
    api_key: String,
    base_url: String,
    memo: Option<Memo>,
}

impl std::fmt::Debug for SerpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerpClient")
            .field("base_url", &self.base_url)
            .field("cached", &self.memo.is_some())
            .finish()
    }
}

impl SerpClient {
    pub fn new(api_key: impl Into<String>, base_url: Option<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            memo: None,
        }
    }

    /// Requires `SERPAPI_API_KEY`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.require_api_key(SERPAPI, "SERPAPI_API_KEY")?;
        Ok(Self::new(api_key, config.get_base_url(SERPAPI)))
    }

    pub fn with_cache(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.memo = Some(Memo::new(store, "search/serp"));
        self
    }

    /// Search one query.
    pub async fn search(&self, query: &str, engine: &str) -> Result<SearchResults> {
        match &self.memo {
            Some(memo) => {
                let args = serde_json::json!({ "query": query, "engine": engine });
                memo.get_or_compute(&args, || self.fetch(query, engine)).await
            }
            None => self.fetch(query, engine).await,
        }
    }

    async fn fetch(&self, query: &str, engine: &str) -> Result<SearchResults> {
        debug!(query, engine, "serp search");
        let resp = shared_client()
            .get(join_url(&self.base_url, "search.json"))
            .query(&[("q", query), ("api_key", self.api_key.as_str()), ("engine", engine)])
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.text().await?;
        if status != 200 {
            return Err(status_to_error(status, &body));
        }
        parse_serp_body(query, &body)
    }
}

fn parse_serp_body(query: &str, body: &str) -> Result<SearchResults> {
    let data: serde_json::Value = if body.trim().is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_str(body)
            .map_err(|e| DeepSearchError::InvalidResponse(format!("Malformed SerpAPI body: {e}")))?
    };

    if data.is_null() || data.as_object().is_some_and(|o| o.is_empty()) {
        warn!(query, "serp returned no data");
        return Ok(SearchResults::empty(query));
    }
    let Some(organic) = data.get("organic_results").and_then(|v| v.as_array()) else {
        warn!(query, "serp response has no organic_results");
        return Ok(SearchResults::empty(query));
    };

    let results = organic
        .iter()
        .map(|hit| {
            let field = |name: &str| {
                hit.get(name).and_then(|v| v.as_str()).ok_or_else(|| {
                    DeepSearchError::InvalidResponse(format!("Search result without {name}"))
                })
            };
            Ok(SearchResult {
                title: field("title")?.to_string(),
                url: field("link")?.to_string(),
                content: hit
                    .get("snippet")
                    .and_then(|v| v.as_str())
                    .unwrap_or(MISSING_SNIPPET)
                    .to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SearchResults {
        query: query.to_string(),
        results,
    })
}

/// `search_serp(query, engine="google")`
pub struct SerpSearchTool {
    client: SerpClient,
    parameters: ToolParameters,
}

impl SerpSearchTool {
    pub fn new(client: SerpClient) -> Self {
        Self {
            client,
            parameters: ToolParameters::object()
                .string("query", "The search query", true)
                .string("engine", "Search engine to use (default: google)", false)
                .build(),
        }
    }
}

#[async_trait]
impl Tool for SerpSearchTool {
    fn name(&self) -> &str {
        "search_serp"
    }

    fn description(&self) -> &str {
        "Use a search engine to search for a single query"
    }

    fn parameters(&self) -> &ToolParameters {
        &self.parameters
    }

    async fn execute(&self, args: &ToolArguments) -> Result<ToolOutput> {
        let query = args.get_str("query")?;
        let engine = args.get_str_opt("engine").unwrap_or(DEFAULT_ENGINE);
        let results = self.client.search(query, engine).await?;
        Ok(ToolOutput::document(results))
    }
}

/// `search_serp_multi(queries, engine="google")`: concurrent single searches.
pub struct SerpMultiSearchTool {
    client: SerpClient,
    parameters: ToolParameters,
}

impl SerpMultiSearchTool {
    pub fn new(client: SerpClient) -> Self {
        Self {
            client,
            parameters: ToolParameters::object()
                .string_array("queries", "The search queries", true)
                .string("engine", "Search engine to use (default: google)", false)
                .build(),
        }
    }
}

#[async_trait]
impl Tool for SerpMultiSearchTool {
    fn name(&self) -> &str {
        "search_serp_multi"
    }

    fn description(&self) -> &str {
        "Use a search engine to search for multiple queries"
    }

    fn parameters(&self) -> &ToolParameters {
        &self.parameters
    }

    async fn execute(&self, args: &ToolArguments) -> Result<ToolOutput> {
        let queries = args.get_str_list("queries")?;
        let engine = args.get_str_opt("engine").unwrap_or(DEFAULT_ENGINE);
        let total = queries.len();

        let searches = queries.iter().enumerate().map(|(i, query)| {
            debug!(index = i, total, query = %query, "multi search");
            self.client.search(query, engine)
        });
        let results = futures::future::join_all(searches)
            .await
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        Ok(ToolOutput::document(MultiSearchResults { results }))
    }
}
