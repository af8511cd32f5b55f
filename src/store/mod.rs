//! Persisted article collection.
//!
//! The collection is the sole source of truth for generated articles; no
//! in-memory cache survives a request. Reads and writes are whole-file
//! operations behind the [`ArticleStore`] seam so tests can substitute an
//! in-memory store.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read articles file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write articles file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("articles file {path} is corrupt: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize articles: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// A generated article paired with its source attribution.
///
/// `original_title` is the identity used for dedup; two posts that both lack
/// a title collide on the same fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedArticle {
    pub original_title: String,
    pub original_author: String,
    /// Markdown text returned by the generation service, stored verbatim.
    pub generated_article: String,
    /// RFC 3339 generation time.
    pub timestamp: String,
}

/// Narrow load/save contract over the persisted article sequence.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Load the persisted sequence. An absent backing file is not an error
    /// and yields an empty sequence.
    async fn load(&self) -> Result<Vec<GeneratedArticle>, StoreError>;

    /// Overwrite the backing file with the full serialized sequence.
    async fn save(&self, articles: &[GeneratedArticle]) -> Result<(), StoreError>;

    /// Whether the backing file exists yet. Drives the list endpoint's
    /// not-found response before the first generation.
    async fn exists(&self) -> bool;
}

/// Flat JSON file store. Read and write are whole-file operations with no
/// locking; callers serialize the read-modify-write cycle themselves.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ArticleStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<GeneratedArticle>, StoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No articles file yet");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.display().to_string(),
                    source: e,
                })
            }
        };

        serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    async fn save(&self, articles: &[GeneratedArticle]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(articles).map_err(StoreError::Serialize)?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Write {
                    path: self.path.display().to_string(),
                    source: e,
                })?;
        }

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| StoreError::Write {
                path: self.path.display().to_string(),
                source: e,
            })?;

        debug!(path = %self.path.display(), count = articles.len(), "Articles saved");
        Ok(())
    }

    async fn exists(&self) -> bool {
        self.path.exists()
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryStore {
    articles: Mutex<Option<Vec<GeneratedArticle>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the given articles.
    #[must_use]
    pub fn with_articles(articles: Vec<GeneratedArticle>) -> Self {
        Self {
            articles: Mutex::new(Some(articles)),
        }
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn load(&self) -> Result<Vec<GeneratedArticle>, StoreError> {
        Ok(self
            .articles
            .lock()
            .expect("store lock poisoned")
            .clone()
            .unwrap_or_default())
    }

    async fn save(&self, articles: &[GeneratedArticle]) -> Result<(), StoreError> {
        *self.articles.lock().expect("store lock poisoned") = Some(articles.to_vec());
        Ok(())
    }

    async fn exists(&self) -> bool {
        self.articles.lock().expect("store lock poisoned").is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str) -> GeneratedArticle {
        GeneratedArticle {
            original_title: title.to_string(),
            original_author: "author".to_string(),
            generated_article: format!("# {title}\n\nBody."),
            timestamp: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = serde_json::to_value(article("X")).unwrap();
        assert!(json.get("originalTitle").is_some());
        assert!(json.get("originalAuthor").is_some());
        assert!(json.get("generatedArticle").is_some());
        assert!(json.get("timestamp").is_some());
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(!store.exists().await);
        assert!(store.load().await.unwrap().is_empty());

        store.save(&[article("A")]).await.unwrap();
        assert!(store.exists().await);
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].original_title, "A");
    }
}
