//! Persisted per-query run records.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::eval::Grade;
use crate::types::Message;

/// Content hash of a query, used as the record id and file stem.
pub fn content_hash(query: &str) -> String {
    format!("{:x}", Sha256::digest(query.as_bytes()))
}

/// Everything recorded for one successfully answered query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub mid: String,
    pub query: String,
    pub target: String,
    /// Wall time in seconds for the agent run plus grading.
    pub elapsed: f64,
    pub started_at: DateTime<Utc>,
    pub trace: Vec<Message>,
    pub grades: BTreeMap<String, Grade>,
}

impl RunRecord {
    /// The answer graded for this record: the last trace message's content.
    pub fn answer(&self) -> &str {
        self.trace.last().map(Message::text).unwrap_or_default()
    }

    /// Write as `<dir>/<mid>.json`.
    pub async fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(format!("{}.json", self.mid));
        tokio::fs::write(&path, serde_json::to_vec(self)?).await?;
        Ok(path)
    }

    pub async fn read_from(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
