//! Content-addressed memoization.
//!
//! Results are stored under a key derived from a namespace plus the
//! canonicalized argument set, so identical calls resolve to the same entry
//! regardless of argument order. Stores only hold JSON values.

pub mod disk;
pub mod memory;

pub use disk::DiskCache;
pub use memory::MemoryCache;

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::Result;

/// Backing store for memoized results.
///
/// Implementations must tolerate concurrent access; writes to the same key
/// may race and the last writer wins.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    async fn put(&self, key: &str, value: &serde_json::Value) -> Result<()>;
}

/// Deterministic fingerprint of a call: SHA-256 over the namespace and the
/// canonical JSON of its arguments.
pub fn cache_key(namespace: &str, args: &serde_json::Value) -> String {
    let mut canonical = String::new();
    write_canonical(args, &mut canonical);
    let digest = Sha256::digest(format!("{namespace}-> {canonical}").as_bytes());
    format!("{digest:x}")
}

fn write_canonical(value: &serde_json::Value, out: &mut String) {
    match value {
        serde_json::Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&serde_json::Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(&map[key], out);
            }
            out.push('}');
        }
        serde_json::Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// Memoizer bound to one namespace of a shared store.
#[derive(Clone)]
pub struct Memo {
    store: Arc<dyn CacheStore>,
    namespace: String,
}

impl Memo {
    pub fn new(store: Arc<dyn CacheStore>, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Key for `args` within this memo's namespace.
    pub fn key(&self, args: &serde_json::Value) -> String {
        cache_key(&self.namespace, args)
    }

    /// Return the cached value for `args`, or run `compute` and store its result.
    ///
    /// Cache read and write failures are logged and never surface; only
    /// errors from `compute` propagate.
    pub async fn get_or_compute<T, F, Fut>(&self, args: &serde_json::Value, compute: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let key = self.key(args);

        match self.store.get(&key).await {
            Ok(Some(cached)) => match serde_json::from_value::<T>(cached) {
                Ok(value) => {
                    debug!(namespace = %self.namespace, %key, "cache hit");
                    return Ok(value);
                }
                Err(e) => {
                    warn!(namespace = %self.namespace, %key, error = %e, "discarding undecodable cache entry");
                }
            },
            Ok(None) => {
                debug!(namespace = %self.namespace, %key, "cache miss");
            }
            Err(e) => {
                warn!(namespace = %self.namespace, %key, error = %e, "cache read failed");
            }
        }

        let value = compute().await?;

        match serde_json::to_value(&value) {
            Ok(encoded) => {
                if let Err(e) = self.store.put(&key, &encoded).await {
                    warn!(namespace = %self.namespace, %key, error = %e, "cache write failed");
                }
            }
            Err(e) => {
                warn!(namespace = %self.namespace, %key, error = %e, "result not cacheable");
            }
        }

        Ok(value)
    }
}

impl std::fmt::Debug for Memo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memo")
            .field("namespace", &self.namespace)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeepSearchError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn key_ignores_argument_order() {
        let a = cache_key("search", &json!({"query": "rust", "engine": "google"}));
        let b = cache_key("search", &json!({"engine": "google", "query": "rust"}));
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn key_depends_on_namespace_and_values() {
        let args = json!({"query": "rust"});
        assert_ne!(cache_key("search", &args), cache_key("scrape", &args));
        assert_ne!(
            cache_key("search", &args),
            cache_key("search", &json!({"query": "go"}))
        );
    }

    #[tokio::test]
    async fn get_or_compute_runs_once_per_key() {
        let memo = Memo::new(Arc::new(MemoryCache::new()), "echo");
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value: String = memo
                .get_or_compute(&json!({"text": "hi"}), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok("hi".to_string())
                })
                .await
                .unwrap();
            assert_eq!(value, "hi");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn compute_errors_are_not_cached() {
        let memo = Memo::new(Arc::new(MemoryCache::new()), "flaky");
        let args = json!({});

        let first: Result<String> = memo
            .get_or_compute(&args, || async { Err(DeepSearchError::api(500, "boom")) })
            .await;
        assert!(first.is_err());

        let second: String = memo
            .get_or_compute(&args, || async { Ok("ok".to_string()) })
            .await
            .unwrap();
        assert_eq!(second, "ok");
    }

    struct BrokenStore;

    #[async_trait]
    impl CacheStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<serde_json::Value>> {
            Err(DeepSearchError::Io(std::io::Error::other("read failed")))
        }

        async fn put(&self, _key: &str, _value: &serde_json::Value) -> Result<()> {
            Err(DeepSearchError::Io(std::io::Error::other("write failed")))
        }
    }

    #[tokio::test]
    async fn store_failures_fall_through_to_compute() {
        let memo = Memo::new(Arc::new(BrokenStore), "broken");
        let value: u32 = memo
            .get_or_compute(&json!({"n": 1}), || async { Ok(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }
}
