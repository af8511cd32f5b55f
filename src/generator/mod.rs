//! Article generation pipeline.
//!
//! Loads source posts, skips the ones whose resolved title already appears in
//! the persisted collection, formats the remainder, calls the generation
//! service one post at a time, and persists the appended collection wholesale.

pub mod client;

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::Config;
use crate::posts::{self, formatter};
use crate::store::{ArticleStore, GeneratedArticle, StoreError};
use self::client::{GenerationClient, GenerationError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to load posts")]
    Load(#[from] posts::LoadError),
    #[error("article generation failed")]
    Generation(#[from] GenerationError),
    #[error("failed to persist articles")]
    Store(#[from] StoreError),
}

/// Result of one generation run.
#[derive(Debug)]
pub struct GenerationOutcome {
    /// The full persisted collection after the run.
    pub articles: Vec<GeneratedArticle>,
    /// How many entries this run appended.
    pub new_count: usize,
    /// Human-readable summary for the caller.
    pub message: String,
}

/// The article generation pipeline.
///
/// All state lives in the injected store; the pipeline itself only holds the
/// generation client and a lock that serializes the read-modify-write cycle,
/// so overlapping trigger requests cannot drop each other's appends.
pub struct Pipeline {
    config: Arc<Config>,
    client: GenerationClient,
    store: Arc<dyn ArticleStore>,
    write_lock: Mutex<()>,
}

impl Pipeline {
    /// Build a pipeline from configuration and an injected store.
    ///
    /// # Errors
    ///
    /// Returns an error if the generation client cannot be constructed.
    pub fn new(
        config: Arc<Config>,
        store: Arc<dyn ArticleStore>,
    ) -> Result<Self, GenerationError> {
        let client = GenerationClient::new(&config)?;
        Ok(Self {
            config,
            client,
            store,
            write_lock: Mutex::new(()),
        })
    }

    /// Run one generation pass.
    ///
    /// Selects up to `num_posts` unprocessed posts (default from config) in
    /// input order, generates an article for each, appends the results to the
    /// persisted collection, and saves it in full. With `force`, the existing
    /// collection is treated as empty: dedup is skipped and the saved file is
    /// regenerated from scratch.
    ///
    /// # Errors
    ///
    /// The first failing generation call aborts the run; nothing from the
    /// batch is persisted. Load and persist failures are fatal as well.
    pub async fn generate(
        &self,
        num_posts: Option<usize>,
        force: bool,
    ) -> Result<GenerationOutcome, PipelineError> {
        let _guard = self.write_lock.lock().await;

        let limit = num_posts.unwrap_or(self.config.default_num_posts);

        let existing = if force {
            Vec::new()
        } else {
            self.store.load().await?
        };

        let processed: std::collections::HashSet<&str> = existing
            .iter()
            .map(|a| a.original_title.as_str())
            .collect();

        let all_posts = posts::load_posts(&self.config.posts_path).await?;
        let total = all_posts.len();

        let selected: Vec<_> = all_posts
            .into_iter()
            .filter(|p| !processed.contains(p.resolved_title()))
            .take(limit)
            .collect();

        debug!(
            total,
            already_processed = processed.len(),
            selected = selected.len(),
            force,
            "Posts selected for generation"
        );

        if selected.is_empty() {
            // Success path: nothing left to do, return the collection verbatim.
            return Ok(GenerationOutcome {
                articles: existing,
                new_count: 0,
                message: "No new posts to process".to_string(),
            });
        }

        let mut generated = Vec::with_capacity(selected.len());
        for post in &selected {
            let prompt = formatter::format_post(post);
            let article_text = self.client.generate(&prompt).await?;

            info!(title = %post.resolved_title(), "Article generated");

            generated.push(GeneratedArticle {
                original_title: post.resolved_title().to_string(),
                original_author: post.resolved_author().to_string(),
                generated_article: article_text,
                timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            });
        }

        let new_count = generated.len();
        let mut combined = existing;
        combined.append(&mut generated);

        self.store.save(&combined).await?;

        info!(new_count, total = combined.len(), "Articles persisted");

        Ok(GenerationOutcome {
            articles: combined,
            new_count,
            message: format!("Generated {new_count} new article(s)"),
        })
    }
}
