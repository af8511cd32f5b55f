//! Source post model and loader.
//!
//! Posts come from a local JSON document that may hold a single post object or
//! a sequence of posts. All fields are optional; downstream code substitutes
//! placeholder values for missing titles and authors.

pub mod formatter;

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Fallback title for posts without one. Also the dedup key in that case.
pub const UNTITLED_POST: &str = "Untitled Post";

/// Fallback author for posts without one.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read posts file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("posts file {path} is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A single discussion-thread submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// A top-level comment on a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

/// A reply to a comment. Nesting below this level is not consumed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reply {
    #[serde(default)]
    pub text: Option<String>,
}

impl Post {
    /// Title used for display and as the dedup key.
    #[must_use]
    pub fn resolved_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED_POST)
    }

    /// Author used for display and attribution.
    #[must_use]
    pub fn resolved_author(&self) -> &str {
        self.author
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or(UNKNOWN_AUTHOR)
    }
}

/// Load the posts document from disk.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, or not valid JSON.
/// Both cases are fatal for the calling request.
pub async fn load_posts(path: &Path) -> Result<Vec<Post>, LoadError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LoadError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

    let value: Value = serde_json::from_str(&raw).map_err(|e| LoadError::Parse {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(resolve_posts(value))
}

/// Resolve the loaded document into a sequence of posts.
///
/// The document may be a single post object or a sequence. An object with a
/// non-empty `title` or a `text` field is one post, and any other object is
/// wrapped as a single-element sequence, so every non-array value resolves to
/// one post. An array is used as-is. Elements that do not deserialize cleanly
/// fall back to an empty post rather than failing the load.
fn resolve_posts(value: Value) -> Vec<Post> {
    match value {
        Value::Array(items) => items.into_iter().map(value_to_post).collect(),
        other => vec![value_to_post(other)],
    }
}

fn value_to_post(value: Value) -> Post {
    serde_json::from_value(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_single_post_with_title() {
        let posts = resolve_posts(json!({"title": "Hello", "text": "Body"}));
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].resolved_title(), "Hello");
    }

    #[test]
    fn test_resolve_single_post_with_text_only() {
        let posts = resolve_posts(json!({"text": "Just a body"}));
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].resolved_title(), UNTITLED_POST);
        assert_eq!(posts[0].text.as_deref(), Some("Just a body"));
    }

    #[test]
    fn test_resolve_array() {
        let posts = resolve_posts(json!([
            {"title": "First"},
            {"title": "Second"},
        ]));
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].resolved_title(), "Second");
    }

    #[test]
    fn test_resolve_arbitrary_object_wraps() {
        let posts = resolve_posts(json!({"something": "else"}));
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].resolved_title(), UNTITLED_POST);
    }

    #[test]
    fn test_empty_title_falls_back() {
        let posts = resolve_posts(json!({"title": "", "text": "Body"}));
        assert_eq!(posts[0].resolved_title(), UNTITLED_POST);
    }

    #[test]
    fn test_resolved_author_default() {
        let post = Post::default();
        assert_eq!(post.resolved_author(), UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let posts = resolve_posts(json!([
            {"title": "Keep", "score": 42, "url": "https://example.com"},
        ]));
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].resolved_title(), "Keep");
    }

    #[tokio::test]
    async fn test_load_missing_file_is_error() {
        let err = load_posts(Path::new("/nonexistent/posts.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
