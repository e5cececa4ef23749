//! Memoizing tool decorator.

use std::sync::Arc;

use async_trait::async_trait;

use super::arguments::ToolArguments;
use super::output::ToolOutput;
use super::tool::Tool;
use super::types::ToolParameters;
use crate::cache::{CacheStore, Memo};
use crate::error::DeepSearchError;

/// Wraps a tool so identical argument sets hit the cache instead of the tool.
///
/// The normalized text output is what gets stored.
pub struct CachedTool {
    inner: Arc<dyn Tool>,
    memo: Memo,
}

impl CachedTool {
    pub fn new(inner: Arc<dyn Tool>, store: Arc<dyn CacheStore>) -> Self {
        let memo = Memo::new(store, format!("tool:{}", inner.name()));
        Self { inner, memo }
    }
}

#[async_trait]
impl Tool for CachedTool {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn description(&self) -> &str {
        self.inner.description()
    }

    fn parameters(&self) -> &ToolParameters {
        self.inner.parameters()
    }

    async fn execute(&self, args: &ToolArguments) -> Result<ToolOutput, DeepSearchError> {
        let text: String = self
            .memo
            .get_or_compute(args.raw(), || async {
                self.inner.execute(args).await?.into_text(self.inner.name())
            })
            .await?;
        Ok(ToolOutput::Text(text))
    }
}
