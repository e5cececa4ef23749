//! Benchmark datasets loaded from local JSONL files.

use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{DeepSearchError, Result};

/// Instructions for Wikipedia-only research.
pub const WIKIPEDIA_ONLY: &str = "You are only allowed to use Wikipedia as a source of information. You can prefix your query with `site:wikipedia.org` to search only Wikipedia. Remember to actually visit the webpages using `scrape_jina`.";

/// Instructions preferring Wikipedia but allowing the open web.
pub const WIKIPEDIA_PREFERRED: &str = "Today's date is June 23, 2025. You strongly prefer using Wikipedia as your source of information. If you can't completely answer the question using Wikipedia, you're welcome to visit other sites. Remember to actually visit the webpages using `scrape_jina`.";

/// Supported benchmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DatasetKind {
    Frames,
    Seal0,
    SimpleQa,
}

impl DatasetKind {
    /// Instructions appended to the agent's system prompt for this dataset.
    pub fn special_instructions(self) -> &'static str {
        match self {
            Self::Frames => WIKIPEDIA_ONLY,
            Self::Seal0 | Self::SimpleQa => WIKIPEDIA_PREFERRED,
        }
    }

    /// Field names holding the question and the reference answer.
    pub fn default_fields(self) -> (&'static str, &'static str) {
        match self {
            Self::Frames => ("prompt", "answer"),
            Self::Seal0 => ("question", "answer"),
            Self::SimpleQa => ("problem", "answer"),
        }
    }
}

/// One question with its reference answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetItem {
    pub query: String,
    pub target: String,
}

impl DatasetItem {
    pub fn new(query: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            target: target.into(),
        }
    }
}

/// Load items using the dataset's default field names.
pub fn load_dataset(kind: DatasetKind, path: impl AsRef<Path>) -> Result<Vec<DatasetItem>> {
    let (query_field, target_field) = kind.default_fields();
    load_jsonl(path, query_field, target_field)
}

/// Load one item per non-blank JSONL line. Non-string targets are kept in
/// their JSON form.
pub fn load_jsonl(path: impl AsRef<Path>, query_field: &str, target_field: &str) -> Result<Vec<DatasetItem>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| {
        DeepSearchError::Configuration(format!("Cannot read dataset {}: {e}", path.display()))
    })?;

    let mut items = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let location = || format!("{}:{}", path.display(), index + 1);
        let row: serde_json::Value = serde_json::from_str(line)
            .map_err(|e| DeepSearchError::Configuration(format!("{}: {e}", location())))?;
        let field = |name: &str| -> Result<String> {
            match row.get(name) {
                Some(serde_json::Value::String(s)) => Ok(s.clone()),
                Some(serde_json::Value::Null) | None => Err(DeepSearchError::Configuration(
                    format!("{}: missing field {name}", location()),
                )),
                Some(other) => Ok(other.to_string()),
            }
        };
        items.push(DatasetItem {
            query: field(query_field)?,
            target: field(target_field)?,
        });
    }
    Ok(items)
}

/// Deterministic sample of `n` items: the first `n` of a seeded permutation.
pub fn sample_items(items: &[DatasetItem], n: usize, seed: u64) -> Vec<DatasetItem> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.shuffle(&mut rng);
    order
        .into_iter()
        .take(n)
        .map(|i| items[i].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn kinds_parse_and_display() {
        assert_eq!(DatasetKind::from_str("seal0").unwrap(), DatasetKind::Seal0);
        assert_eq!(DatasetKind::from_str("simpleqa").unwrap(), DatasetKind::SimpleQa);
        assert_eq!(DatasetKind::Frames.to_string(), "frames");
        assert!(DatasetKind::from_str("mmlu").is_err());
        assert!(DatasetKind::Frames.special_instructions().contains("only allowed"));
    }

    #[test]
    fn loads_jsonl_with_custom_fields() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("seal0.jsonl");
        std::fs::write(
            &path,
            "{\"question\": \"Who?\", \"answer\": \"Ada\"}\n\n{\"question\": \"How many?\", \"answer\": 3}\n",
        )
        .unwrap();

        let items = load_dataset(DatasetKind::Seal0, &path).unwrap();
        assert_eq!(items, vec![DatasetItem::new("Who?", "Ada"), DatasetItem::new("How many?", "3")]);
    }

    #[test]
    fn missing_field_names_the_line() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.jsonl");
        std::fs::write(&path, "{\"prompt\": \"q\", \"answer\": \"a\"}\n{\"prompt\": \"q\"}\n").unwrap();

        let err = load_dataset(DatasetKind::Frames, &path).unwrap_err();
        assert!(err.to_string().contains("bad.jsonl:2: missing field answer"), "{err}");
    }

    #[test]
    fn sampling_is_seeded() {
        let items: Vec<DatasetItem> = (0..20).map(|i| DatasetItem::new(format!("q{i}"), "t")).collect();

        let a = sample_items(&items, 5, 123);
        let b = sample_items(&items, 5, 123);
        assert_eq!(a, b);
        assert_eq!(a.len(), 5);
        assert_ne!(a, sample_items(&items, 5, 7));
        assert_eq!(sample_items(&items, 50, 123).len(), 20);
    }
}
