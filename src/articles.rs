//! Display helpers for generated articles.

use crate::store::GeneratedArticle;

/// Title and body split out of an article's Markdown for display.
#[derive(Debug, PartialEq, Eq)]
pub struct DisplayArticle<'a> {
    pub title: String,
    /// Markdown body with the title heading removed.
    pub body: &'a str,
}

/// Extract the display title from the first level-1 Markdown heading and
/// strip that heading from the body shown to the reader. Falls back to the
/// original post title when the generated text has no `#` heading.
#[must_use]
pub fn display_article(article: &GeneratedArticle) -> DisplayArticle<'_> {
    let markdown = article.generated_article.as_str();

    for (offset, line) in line_spans(markdown) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(heading) = trimmed.strip_prefix("# ") {
            let body_start = offset + line.len();
            let body = markdown[body_start..].trim_start_matches(['\r', '\n']);
            return DisplayArticle {
                title: heading.trim().to_string(),
                body,
            };
        }
        // First non-empty line is not a level-1 heading; nothing to strip.
        break;
    }

    DisplayArticle {
        title: article.original_title.clone(),
        body: markdown,
    }
}

/// Iterate lines with their byte offsets, keeping terminators out of the line.
fn line_spans(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    text.split_inclusive('\n').map(move |raw| {
        let start = offset;
        offset += raw.len();
        (start, raw)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(markdown: &str) -> GeneratedArticle {
        GeneratedArticle {
            original_title: "Original".to_string(),
            original_author: "author".to_string(),
            generated_article: markdown.to_string(),
            timestamp: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_extracts_and_strips_heading() {
        let a = article("# The Big Story\n\nFirst paragraph.\n\n## Section\n");
        let display = display_article(&a);
        assert_eq!(display.title, "The Big Story");
        assert!(display.body.starts_with("First paragraph."));
        assert!(!display.body.contains("# The Big Story"));
    }

    #[test]
    fn test_falls_back_to_original_title() {
        let a = article("Just some text without a heading.\n");
        let display = display_article(&a);
        assert_eq!(display.title, "Original");
        assert_eq!(display.body, a.generated_article);
    }

    #[test]
    fn test_leading_blank_lines_skipped() {
        let a = article("\n\n# Late Heading\nBody here.");
        let display = display_article(&a);
        assert_eq!(display.title, "Late Heading");
        assert_eq!(display.body, "Body here.");
    }

    #[test]
    fn test_level_two_heading_not_extracted() {
        let a = article("## Not a title\nBody.");
        let display = display_article(&a);
        assert_eq!(display.title, "Original");
    }

    #[test]
    fn test_heading_after_text_not_extracted() {
        let a = article("Intro line.\n# Heading later\n");
        let display = display_article(&a);
        assert_eq!(display.title, "Original");
        assert_eq!(display.body, a.generated_article);
    }
}
