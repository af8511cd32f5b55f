use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};

use super::templates;
use super::AppState;
use crate::store::GeneratedArticle;

/// Create the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/article/:index", get(article_detail))
        .route("/healthz", get(health))
        .route("/favicon.ico", get(favicon))
        .route("/api/articles", get(api_articles))
        .route("/api/generate", post(api_generate))
}

// ========== HTML Routes ==========

async fn home(State(state): State<AppState>) -> Response {
    let articles = match state.store.load().await {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(error = ?e, "Failed to load articles for home page");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Storage error").into_response();
        }
    };

    let html = templates::render_home(&articles, state.config.default_num_posts);
    Html(html).into_response()
}

async fn article_detail(State(state): State<AppState>, Path(index): Path<usize>) -> Response {
    let articles = match state.store.load().await {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(error = ?e, "Failed to load articles for detail page");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Storage error").into_response();
        }
    };

    let Some(article) = articles.get(index) else {
        return (StatusCode::NOT_FOUND, "Article not found").into_response();
    };

    let html = templates::render_article_detail(article, index);
    Html(html).into_response()
}

async fn health() -> &'static str {
    "OK"
}

async fn favicon() -> Response {
    // Return a simple SVG favicon (newspaper emoji)
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><text y=".9em" font-size="90">📰</text></svg>"##;
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/svg+xml")],
        svg,
    )
        .into_response()
}

// ========== JSON API Routes ==========

/// Query parameters for the generate trigger.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateParams {
    /// How many unprocessed posts to generate articles for.
    #[serde(rename = "numPosts")]
    num_posts: Option<usize>,
    /// Ignore the existing collection and regenerate from scratch.
    #[serde(default)]
    force: bool,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    success: bool,
    message: String,
    articles: Vec<GeneratedArticle>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    success: bool,
    error: String,
}

async fn api_generate(
    State(state): State<AppState>,
    Query(params): Query<GenerateParams>,
) -> Response {
    // Reject zero explicitly; Query already rejects negatives for usize.
    if params.num_posts == Some(0) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                success: false,
                error: "numPosts must be a positive integer".to_string(),
            }),
        )
            .into_response();
    }

    match state.pipeline.generate(params.num_posts, params.force).await {
        Ok(outcome) => {
            tracing::info!(
                new_count = outcome.new_count,
                total = outcome.articles.len(),
                "Generation run finished"
            );
            Json(GenerateResponse {
                success: true,
                message: outcome.message,
                articles: outcome.articles,
            })
            .into_response()
        }
        Err(e) => {
            // Full cause for operators; generic message for the caller.
            tracing::error!(error = ?e, "Generation run failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    success: false,
                    error: "Failed to generate articles".to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn api_articles(State(state): State<AppState>) -> Response {
    if !state.store.exists().await {
        return (StatusCode::NOT_FOUND, Json(Vec::<GeneratedArticle>::new())).into_response();
    }

    match state.store.load().await {
        Ok(articles) => Json(articles).into_response(),
        Err(e) => {
            tracing::error!(error = ?e, "Failed to load articles");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Failed to read articles"})),
            )
                .into_response()
        }
    }
}
