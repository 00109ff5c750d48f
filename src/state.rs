//! Shared server state: loaded indexes and the default payload path.

use crate::cache;
use crate::error::Result;
use crate::search::TermIndex;
use anyhow::Context;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Maximum number of loaded payloads to keep in memory.
const LRU_CACHE_SIZE: NonZeroUsize = NonZeroUsize::new(16).unwrap();

/// Shared state for payload loading and caching.
pub struct DocState {
    /// LRU cache of loaded indexes, keyed by canonical payload path
    cache: RwLock<LruCache<PathBuf, Arc<TermIndex>>>,

    /// Payload used when a request names none
    default_path: RwLock<Option<PathBuf>>,
}

impl std::fmt::Debug for DocState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocState")
            .field("cache_size", &self.cache.try_read().map(|c| c.len()).ok())
            .field("default_path", &self.default_path.try_read().map(|p| p.clone()).ok())
            .finish()
    }
}

impl Default for DocState {
    fn default() -> Self {
        Self::new()
    }
}

impl DocState {
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(LruCache::new(LRU_CACHE_SIZE)),
            default_path: RwLock::new(None),
        }
    }

    pub async fn default_path(&self) -> Option<PathBuf> {
        self.default_path.read().await.clone()
    }

    pub async fn set_default_path(&self, path: PathBuf) {
        *self.default_path.write().await = Some(path);
    }

    /// Resolve a request path, falling back to the default payload.
    pub async fn resolve_path(&self, path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) if !p.trim().is_empty() => Ok(PathBuf::from(crate::server::expand_tilde(p.trim()).into_owned())),
            _ => self.default_path().await.context(
                "No search index path given and no default index loaded. Pass `path` or call load_index first.",
            ),
        }
    }

    /// Get the index for a payload, loading it on first use.
    pub async fn get_index(&self, path: &Path) -> Result<Arc<TermIndex>> {
        let canonical = tokio::fs::canonicalize(path)
            .await
            .with_context(|| format!("Search index not found at {}", path.display()))?;

        {
            let mut cache = self.cache.write().await;
            if let Some(index) = cache.get(&canonical) {
                tracing::debug!("Cache hit for {}", canonical.display());
                return Ok(index.clone());
            }
        }

        tracing::info!("Loading search index from {}", canonical.display());
        let index = Arc::new(cache::load_or_build(&canonical).await?);
        self.cache.write().await.put(canonical, index.clone());
        Ok(index)
    }

    /// Drop a loaded payload so the next request reloads it from disk.
    pub async fn evict(&self, path: &Path) -> bool {
        let Ok(canonical) = tokio::fs::canonicalize(path).await else {
            return false;
        };
        self.cache.write().await.pop(&canonical).is_some()
    }

    pub async fn is_cached(&self, path: &Path) -> bool {
        match tokio::fs::canonicalize(path).await {
            Ok(canonical) => self.cache.read().await.contains(&canonical),
            Err(_) => false,
        }
    }
}
