use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::{ai::prompt::ChatMessage, config::Config};

// Longest slice of an error body carried into the error message.
const BODY_EXCERPT_LEN: usize = 300;

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("request to the chat API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("chat API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("chat API response could not be parsed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("chat API response contained no choices")]
    NoChoices,

    #[error("chat API response contained no message content")]
    EmptyContent,
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    fn model(&self) -> &str;

    /// Sends the conversation and returns the first choice's text, unmodified.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError>;
}

#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Non-streaming client for an OpenAI-compatible chat completion endpoint.
pub struct CompletionClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
}

impl CompletionClient {
    pub fn new(config: &Config) -> Result<Self, CompletionError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: config.completions_url(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl ChatClient for CompletionClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        let body = ChatRequest {
            model: &self.model,
            messages,
            stream: false,
        };

        tracing::debug!(model = %self.model, messages = messages.len(), "requesting completion");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(CompletionError::Status {
                status,
                body: excerpt(&text),
            });
        }

        first_choice_content(&text)
    }
}

fn first_choice_content(body: &str) -> Result<String, CompletionError> {
    let completion: ChatCompletion = serde_json::from_str(body)?;
    completion
        .choices
        .into_iter()
        .next()
        .ok_or(CompletionError::NoChoices)?
        .message
        .content
        .ok_or(CompletionError::EmptyContent)
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((idx, _)) => format!("{}…", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
