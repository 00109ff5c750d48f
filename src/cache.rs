//! On-disk cache for built term indexes.
//!
//! A built [`InvertedIndex`] is stored with postcard next to its payload as
//! `<file name>.index`. The file carries the payload fingerprint; a cache whose
//! fingerprint no longer matches the payload is discarded and rebuilt.

use crate::error::Result;
use crate::index::SearchIndex;
use crate::payload;
use crate::search::{InvertedIndex, TermIndex};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Bumped whenever tokenization, term hashing or scoring changes the stored index.
const CACHE_FORMAT_VERSION: u32 = 2;

#[derive(Serialize, Deserialize)]
struct CachedIndex {
    version: u32,
    fingerprint: u64,
    terms: InvertedIndex,
}

/// Cache file location for one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexCache {
    path: PathBuf,
}

impl IndexCache {
    /// Cache next to `payload_path`, e.g. `search_index.js` → `search_index.js.index`.
    ///
    /// The suffix is appended to the full file name so the cache path never
    /// equals the payload path, whatever the payload is called.
    pub fn for_payload(payload_path: &Path) -> Self {
        let mut file_name = payload_path.file_name().map(OsString::from).unwrap_or_default();
        file_name.push(".index");
        Self {
            path: payload_path.with_file_name(file_name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cached index if it was built from a payload with `fingerprint`.
    ///
    /// Stale or unreadable cache files are removed.
    pub async fn load(&self, fingerprint: u64) -> Option<InvertedIndex> {
        let bytes = tokio::fs::read(&self.path).await.ok()?;

        let decoded = tokio::task::spawn_blocking(move || postcard::from_bytes::<CachedIndex>(&bytes))
            .await
            .ok()?;

        match decoded {
            Ok(cached) if cached.version == CACHE_FORMAT_VERSION && cached.fingerprint == fingerprint => {
                tracing::debug!("Using cached search index at {}", self.path.display());
                Some(cached.terms)
            }
            Ok(_) => {
                tracing::info!(
                    "Cache stale, will rebuild index (file: {})",
                    self.path.display()
                );
                let _ = tokio::fs::remove_file(&self.path).await;
                None
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to deserialize cached index at {}: {}",
                    self.path.display(),
                    e
                );
                let _ = tokio::fs::remove_file(&self.path).await;
                None
            }
        }
    }

    /// Store an index built from a payload with `fingerprint`.
    ///
    /// Never overwrites: if another process created the file first, its copy wins.
    pub async fn store(&self, fingerprint: u64, terms: &InvertedIndex) -> Result<()> {
        let path = self.path.clone();
        let cached = CachedIndex {
            version: CACHE_FORMAT_VERSION,
            fingerprint,
            terms: terms.clone(),
        };

        tokio::task::spawn_blocking(move || -> Result<()> {
            let bytes = postcard::to_stdvec(&cached).context("Failed to serialize search index")?;
            match std::fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&path)
            {
                Ok(mut file) => {
                    use std::io::Write as _;
                    if let Err(e) = file.write_all(&bytes) {
                        let _ = std::fs::remove_file(&path);
                        return Err(e).with_context(|| {
                            format!("Failed to write search index to {}", path.display())
                        });
                    }
                    tracing::debug!("Cached search index to {}", path.display());
                    Ok(())
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    tracing::debug!("Index file already exists at {}", path.display());
                    Ok(())
                }
                Err(e) => Err(e)
                    .with_context(|| format!("Failed to create index file {}", path.display())),
            }
        })
        .await
        .context("Task panicked")?
    }
}

/// Load a payload and its term index, reusing the on-disk cache when fresh.
///
/// Cache write failures are logged, not returned; the built index is still usable.
pub async fn load_or_build(payload_path: &Path) -> Result<TermIndex> {
    let docs = payload::load(payload_path).await?;
    let fingerprint = docs.fingerprint();
    let cache = IndexCache::for_payload(payload_path);

    if let Some(terms) = cache.load(fingerprint).await
        && let Some(index) = TermIndex::from_parts(docs.clone(), terms)
    {
        return Ok(index);
    }

    let index = build_blocking(docs).await?;
    if let Err(e) = cache.store(fingerprint, index.terms()).await {
        tracing::warn!("{:#}", e);
    }
    Ok(index)
}

async fn build_blocking(docs: SearchIndex) -> Result<TermIndex> {
    tokio::task::spawn_blocking(move || TermIndex::build(docs))
        .await
        .context("Task panicked")
}
