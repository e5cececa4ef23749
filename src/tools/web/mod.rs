//! Search and scrape tools backed by SerpAPI and the Jina reader.

pub mod scrape;
pub mod search;

pub use scrape::{JinaReader, JinaScrapeTool, ScrapeResult};
pub use search::{
    MultiSearchResults, SearchResult, SearchResults, SerpClient, SerpMultiSearchTool,
    SerpSearchTool,
};

use std::sync::Arc;

use super::{CachedTool, Tool};
use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::Result;

/// The standard research tool set: `search_serp`, `search_serp_multi`,
/// `scrape_jina`.
///
/// Missing credentials fail here, before any request is made. With a
/// cache, single searches (including those fanned out by the multi search)
/// and page scrapes are memoized.
pub fn web_tools(config: &Config, cache: Option<Arc<dyn CacheStore>>) -> Result<Vec<Arc<dyn Tool>>> {
    let mut serp = SerpClient::from_config(config)?;
    let scrape: Arc<dyn Tool> = Arc::new(JinaScrapeTool::new(JinaReader::from_config(config)?));

    let scrape = match cache {
        Some(store) => {
            serp = serp.with_cache(store.clone());
            Arc::new(CachedTool::new(scrape, store)) as Arc<dyn Tool>
        }
        None => scrape,
    };

    Ok(vec![
        Arc::new(SerpSearchTool::new(serp.clone())),
        Arc::new(SerpMultiSearchTool::new(serp)),
        scrape,
    ])
}
