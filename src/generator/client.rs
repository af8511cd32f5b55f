//! Chat-completions client for the article generation service.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

/// System instruction sent with every generation request.
const SYSTEM_PROMPT: &str = "You are an editorial writer. Rewrite the provided \
discussion-thread content into a cohesive, well-structured article in Markdown. \
Start with a single '#' title, organize the body under '##' section headings, \
quote notable comments as blockquotes, and use bold or italic emphasis sparingly. \
Preserve the substance of the original discussion without inventing facts.";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("generation service returned status {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("generation response contained no choices")]
    EmptyResponse,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
///
/// Wraps a single synchronous-semantics call per post with a fixed system
/// instruction and moderate randomness. The API key is sent as a bearer
/// header and never logged.
pub struct GenerationClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GenerationClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(config.generation_timeout)
            .build()
            .map_err(GenerationError::Transport)?;

        Ok(Self {
            client,
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
            temperature: config.generation_temperature,
            max_tokens: config.generation_max_tokens,
        })
    }

    /// Generate an article from formatted post text.
    ///
    /// Returns the generated Markdown verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error on any transport or API failure, or when the response
    /// carries no content. The caller treats this as fatal for the batch.
    pub async fn generate(&self, formatted_post: &str) -> Result<String, GenerationError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: formatted_post,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!(model = %self.model, prompt_len = formatted_post.len(), "Requesting generation");

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(GenerationError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api { status, body });
        }

        let parsed: ChatResponse = response.json().await.map_err(GenerationError::Transport)?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(GenerationError::EmptyResponse)
    }
}
