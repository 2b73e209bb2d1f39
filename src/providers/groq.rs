//! Groq Chat Completion Proxy
//!
//! Forwards a single user message to Groq's OpenAI-compatible
//! `/chat/completions` endpoint and hands back the first choice's text.
//!
//! One attempt per call: no retry, no backoff. Failures of any kind
//! (transport, non-2xx, body shape) come back as `Err` from
//! [`GroqService::try_complete`] and as an `"Error: ..."` string from
//! [`GroqService::complete`].

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::config::GroqConfig;
use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::utils::constants::{CHAT_ERROR_PREFIX, CHAT_MAX_TOKENS, CHAT_TEMPERATURE, USER_AGENT};

// ============================================
// Wire types
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body sent to the chat-completion endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

/// Effective prompt: context is prepended only when present and non-empty
pub fn build_prompt(message: &str, context: Option<&str>) -> String {
    match context {
        Some(ctx) if !ctx.is_empty() => format!("Context: {}\n\nUser Question: {}", ctx, message),
        _ => message.to_string(),
    }
}

// ============================================
// Client
// ============================================

/// Groq API client. Holds only immutable configuration after construction.
pub struct GroqService {
    client: reqwest::Client,
    config: GroqConfig,
}

impl GroqService {
    /// Build the service; fails when the HTTP client cannot be constructed
    pub fn new(config: GroqConfig) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            AppError::with_source(ErrorCode::ConfigInvalidValue, "Failed to build HTTP client", e)
        })?;

        info!(model = %config.model, url = %config.api_url, "🤖 Groq service initialized");
        Ok(Self { client, config })
    }

    /// Resolve configuration from the environment and build the service
    pub fn from_env() -> AppResult<Self> {
        Self::new(GroqConfig::from_env()?)
    }

    pub fn request_body(&self, message: &str, context: Option<&str>) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage::user(build_prompt(message, context))],
            temperature: CHAT_TEMPERATURE,
            max_tokens: CHAT_MAX_TOKENS,
        }
    }

    /// Send one chat completion and return the first choice's text
    pub async fn try_complete(&self, message: &str, context: Option<&str>) -> AppResult<String> {
        let body = self.request_body(message, context);

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::new(
                ErrorCode::GroqBadStatus,
                format!("{} for url ({})", status, self.config.api_url),
            ));
        }

        let data: ChatCompletionResponse = response.json().await?;

        data.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                AppError::new(
                    ErrorCode::GroqInvalidResponse,
                    "response has no choices[0].message.content",
                )
            })
    }

    /// Total variant of [`try_complete`](Self::try_complete)
    pub async fn complete(&self, message: &str, context: Option<&str>) -> String {
        match self.try_complete(message, context).await {
            Ok(reply) => reply,
            Err(e) => error_reply(&e),
        }
    }
}

/// Log a failed completion and turn it into the `"Error: ..."` reply text
pub fn error_reply(err: &AppError) -> String {
    warn!(code = err.code_str(), "Groq completion failed: {}", err.message);
    format!("{}{}", CHAT_ERROR_PREFIX, err.message)
}
