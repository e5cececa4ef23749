//! Page scraping through the Jina reader.

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{Config, JINA};
use crate::error::{DeepSearchError, Result};
use crate::provider::http::{bearer_headers, shared_client, status_to_error};
use crate::tools::{Tool, ToolArguments, ToolOutput, ToolParameters, ToText};

const DEFAULT_BASE_URL: &str = "https://r.jina.ai";

/// A fetched page rendered as markdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content: String,
}

impl ToText for ScrapeResult {
    fn to_text(&self) -> String {
        format!(
            "<scrape_result>\n<title>{}</title>\n<description>{}</description>\n<url>{}</url>\n<content>{}</content>\n</scrape_result>",
            self.title, self.description, self.url, self.content
        )
    }
}

#[derive(Clone)]
pub struct JinaReader {
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for JinaReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JinaReader")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl JinaReader {
    pub fn new(api_key: impl Into<String>, base_url: Option<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    /// Requires `JINA_API_KEY`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.require_api_key(JINA, "JINA_API_KEY")?;
        Ok(Self::new(api_key, config.get_base_url(JINA)))
    }

    pub async fn scrape(&self, url: &str) -> Result<ScrapeResult> {
        let target = format!("{}/{}", self.base_url.trim_end_matches('/'), url);
        let mut headers = bearer_headers(&self.api_key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert("x-engine", HeaderValue::from_static("browser"));
        headers.insert("x-return-format", HeaderValue::from_static("markdown"));
        headers.insert("x-token-budget", HeaderValue::from_static("1000000"));

        debug!(url, "jina scrape");
        let resp = shared_client().get(&target).headers(headers).send().await?;

        let status = resp.status().as_u16();
        let body = resp.text().await?;
        if status != 200 {
            return Err(status_to_error(status, &body));
        }

        let envelope: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| DeepSearchError::InvalidResponse(format!("Malformed reader body: {e}")))?;
        match envelope.get("data") {
            Some(data) if data.as_object().is_some_and(|o| !o.is_empty()) => {
                Ok(serde_json::from_value(data.clone())?)
            }
            _ => Err(DeepSearchError::InvalidResponse(format!(
                "Reader returned no data for {url}"
            ))),
        }
    }
}

/// `scrape_jina(url)`
pub struct JinaScrapeTool {
    reader: JinaReader,
    parameters: ToolParameters,
}

impl JinaScrapeTool {
    pub fn new(reader: JinaReader) -> Self {
        Self {
            reader,
            parameters: ToolParameters::object()
                .string("url", "URL of the webpage to download", true)
                .build(),
        }
    }
}

#[async_trait]
impl Tool for JinaScrapeTool {
    fn name(&self) -> &str {
        "scrape_jina"
    }

    fn description(&self) -> &str {
        "Download a webpage"
    }

    fn parameters(&self) -> &ToolParameters {
        &self.parameters
    }

    async fn execute(&self, args: &ToolArguments) -> Result<ToolOutput> {
        let page = self.reader.scrape(args.get_str("url")?).await?;
        Ok(ToolOutput::document(page))
    }
}
