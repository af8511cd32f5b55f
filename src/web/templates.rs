//! HTML templates for the browsing UI.
//!
//! Article bodies are stored as Markdown and rendered client-side with
//! marked.js; the server only splits out the display title.

use crate::articles::display_article;
use crate::store::GeneratedArticle;

/// Base HTML layout.
fn base_layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en" data-theme="auto">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="color-scheme" content="light dark">
    <title>{title} - Thread Press</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css">
    <script src="https://cdn.jsdelivr.net/npm/marked/marked.min.js"></script>
    <script>
        (function() {{
            var theme = localStorage.getItem('theme');
            if (theme) {{
                document.documentElement.setAttribute('data-theme', theme);
            }} else if (window.matchMedia('(prefers-color-scheme: dark)').matches) {{
                document.documentElement.setAttribute('data-theme', 'dark');
            }}
        }})();
    </script>
</head>
<body>
    <header class="container">
        <nav>
            <ul>
                <li><a href="/"><strong>Thread Press</strong></a></li>
            </ul>
            <ul>
                <li><a href="/">Articles</a></li>
                <li><button id="theme-toggle" class="outline" title="Toggle dark mode" aria-label="Toggle dark mode">🌓</button></li>
            </ul>
        </nav>
    </header>
    <main class="container">
        {content}
    </main>
    <footer class="container">
        <small>Thread Press | <a href="/api/articles">JSON</a></small>
    </footer>
    <script>
        (function() {{
            var themeToggle = document.getElementById('theme-toggle');
            if (themeToggle) {{
                themeToggle.addEventListener('click', function() {{
                    var html = document.documentElement;
                    var next = (html.getAttribute('data-theme') === 'dark') ? 'light' : 'dark';
                    html.setAttribute('data-theme', next);
                    localStorage.setItem('theme', next);
                }});
            }}
        }})();
    </script>
</body>
</html>"#
    )
}

/// Render the article list page.
pub fn render_home(articles: &[GeneratedArticle], default_num_posts: usize) -> String {
    let mut content = String::from("<h1>Articles</h1>");

    content.push_str(&format!(
        r#"<form id="generate-form">
            <fieldset role="group">
                <input type="number" id="num-posts" name="numPosts" value="{default_num_posts}" min="1" aria-label="Number of posts">
                <button type="submit" id="generate-btn">Generate</button>
            </fieldset>
            <label><input type="checkbox" id="force"> Regenerate all (ignore existing)</label>
        </form>
        <p id="generate-status"></p>"#
    ));

    content.push_str(
        r#"<script>
            (function() {
                var form = document.getElementById('generate-form');
                form.addEventListener('submit', function(e) {
                    e.preventDefault();
                    var btn = document.getElementById('generate-btn');
                    var status = document.getElementById('generate-status');
                    var num = document.getElementById('num-posts').value;
                    var force = document.getElementById('force').checked;
                    btn.setAttribute('aria-busy', 'true');
                    status.textContent = 'Generating...';
                    fetch('/api/generate?numPosts=' + encodeURIComponent(num) + '&force=' + force, { method: 'POST' })
                        .then(function(r) { return r.json(); })
                        .then(function(data) {
                            if (data.success) { window.location.reload(); }
                            else { status.textContent = data.error || 'Generation failed'; btn.removeAttribute('aria-busy'); }
                        })
                        .catch(function() { status.textContent = 'Request failed'; btn.removeAttribute('aria-busy'); });
                });
            })();
        </script>"#,
    );

    if articles.is_empty() {
        content.push_str("<p>No articles yet. Generate some from the source posts.</p>");
    } else {
        for (index, article) in articles.iter().enumerate() {
            content.push_str(&render_article_card(article, index));
        }
    }

    base_layout("Articles", &content)
}

/// Render one article card for the list page.
fn render_article_card(article: &GeneratedArticle, index: usize) -> String {
    let display = display_article(article);
    format!(
        r#"<article>
            <header><a href="/article/{index}"><strong>{}</strong></a></header>
            <p class="meta"><small>From a post by {} | {}</small></p>
        </article>"#,
        html_escape(&display.title),
        html_escape(&article.original_author),
        html_escape(&article.timestamp),
    )
}

/// Render the article detail page.
pub fn render_article_detail(article: &GeneratedArticle, index: usize) -> String {
    let display = display_article(article);

    // Embed the Markdown body as a JS string literal for client-side rendering.
    let body_js = serde_json::to_string(display.body).unwrap_or_else(|_| "\"\"".to_string());

    let content = format!(
        r#"<article>
            <header>
                <h1>{}</h1>
                <p class="meta">
                    <small><strong>Original post:</strong> {} by {}<br>
                    <strong>Generated:</strong> {}</small>
                </p>
            </header>
            <div id="article-body"></div>
        </article>
        <p><a href="/">&larr; Back to articles</a></p>
        <script>
            document.getElementById('article-body').innerHTML = marked.parse({body_js});
        </script>"#,
        html_escape(&display.title),
        html_escape(&article.original_title),
        html_escape(&article.original_author),
        html_escape(&article.timestamp),
    );

    base_layout(&display.title, &content)
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
