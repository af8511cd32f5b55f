//! Prompt formatting for generation input.

use super::Post;

/// Maximum number of comments included in the prompt.
const MAX_COMMENTS: usize = 5;

/// Maximum number of replies included per comment.
const MAX_REPLIES: usize = 2;

/// Render a post and a bounded slice of its comment tree into a single text
/// block suitable as generation input.
///
/// At most [`MAX_COMMENTS`] comments are included, each with at most
/// [`MAX_REPLIES`] replies rendered as quoted lines. The bound keeps the
/// prompt within the generation service's context and cost limits. Missing
/// fields render as empty strings.
#[must_use]
pub fn format_post(post: &Post) -> String {
    let mut block = String::new();

    block.push_str(&format!("Post Title: {}\n", post.resolved_title()));
    block.push_str(&format!("Posted by: {}\n\n", post.resolved_author()));
    block.push_str(post.text.as_deref().unwrap_or(""));
    block.push('\n');

    if !post.comments.is_empty() {
        block.push_str("\nTop Comments:\n");
        for (i, comment) in post.comments.iter().take(MAX_COMMENTS).enumerate() {
            block.push_str(&format!(
                "\nComment {}: {}\n",
                i + 1,
                comment.text.as_deref().unwrap_or("")
            ));
            for reply in comment.replies.iter().take(MAX_REPLIES) {
                block.push_str(&format!("  > Reply: {}\n", reply.text.as_deref().unwrap_or("")));
            }
        }
    }

    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posts::{Comment, Reply};

    fn post_with_comments(comments: usize, replies: usize) -> Post {
        Post {
            title: Some("Test".to_string()),
            author: Some("tester".to_string()),
            text: Some("Body text".to_string()),
            comments: (0..comments)
                .map(|c| Comment {
                    text: Some(format!("comment {c}")),
                    replies: (0..replies)
                        .map(|r| Reply {
                            text: Some(format!("reply {c}.{r}")),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_bounds_comments_and_replies() {
        let post = post_with_comments(10, 5);
        let block = format_post(&post);

        let comment_count = block.matches("\nComment ").count();
        let reply_count = block.matches("> Reply:").count();
        assert_eq!(comment_count, 5);
        assert_eq!(reply_count, 5 * 2);
    }

    #[test]
    fn test_no_comments_section_when_empty() {
        let post = Post {
            title: Some("Quiet".to_string()),
            ..Post::default()
        };
        let block = format_post(&post);
        assert!(!block.contains("Top Comments"));
    }

    #[test]
    fn test_missing_fields_render_empty() {
        let post = Post {
            comments: vec![Comment::default()],
            ..Post::default()
        };
        let block = format_post(&post);
        assert!(block.contains("Post Title: Untitled Post"));
        assert!(block.contains("Posted by: Unknown Author"));
        assert!(block.contains("Comment 1: \n"));
    }

    #[test]
    fn test_includes_body_and_attribution() {
        let post = post_with_comments(1, 1);
        let block = format_post(&post);
        assert!(block.starts_with("Post Title: Test\n"));
        assert!(block.contains("Posted by: tester"));
        assert!(block.contains("Body text"));
        assert!(block.contains("  > Reply: reply 0.0"));
    }
}
