//! Chat-completion client for the model providers.
//!
//! [`ModelClient`] is the seam the decomposer and the code review plugin talk
//! to. [`ChatClient`] implements it over HTTP for both supported providers,
//! which share the OpenAI-compatible wire format.

use std::time::Duration;

use log::{debug, error};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::{
    config::{ProviderSettings, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE},
    error::{AriaError, Result},
};

/// Fixed timeout for a single completion request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One chat message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Sampling options for a completion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl CompletionOptions {
    /// Same options with a different temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Sends a conversation to a text-generation service and returns the reply.
pub trait ModelClient {
    /// Request a completion and return the raw text of the first choice.
    ///
    /// # Errors
    ///
    /// Returns `AriaError::Network` when the service cannot be reached and
    /// `AriaError::Parse` when its response has no usable content.
    fn complete(&self, messages: &[ChatMessage], options: CompletionOptions) -> Result<String>;
}

impl<T: ModelClient + ?Sized> ModelClient for Box<T> {
    fn complete(&self, messages: &[ChatMessage], options: CompletionOptions) -> Result<String> {
        (**self).complete(messages, options)
    }
}

impl<T: ModelClient + ?Sized> ModelClient for &T {
    fn complete(&self, messages: &[ChatMessage], options: CompletionOptions) -> Result<String> {
        (**self).complete(messages, options)
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Blocking HTTP client for an OpenAI-compatible `/chat/completions`
/// endpoint.
pub struct ChatClient {
    http: Client,
    settings: ProviderSettings,
}

impl ChatClient {
    /// Build a client for the resolved provider endpoint.
    ///
    /// # Errors
    ///
    /// Returns `AriaError::Network` if the HTTP client cannot be constructed.
    pub fn new(settings: ProviderSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("aria/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AriaError::network("Failed to create HTTP client").with_source(e))?;
        Ok(Self { http, settings })
    }

    /// The endpoint this client posts to.
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.settings.base_url)
    }
}

impl ModelClient for ChatClient {
    fn complete(&self, messages: &[ChatMessage], options: CompletionOptions) -> Result<String> {
        let url = self.endpoint();
        let request = CompletionRequest {
            model: &self.settings.model,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            stream: false,
        };

        debug!(
            "POST {url} (model {}, {} messages)",
            self.settings.model,
            messages.len()
        );

        let provider = self.settings.provider.display_name();
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .json(&request)
            .send()
            .map_err(|e| {
                error!("{provider} API call failed: {e}");
                AriaError::network(format!("{provider} API call failed")).with_source(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            error!("{provider} API error: {status} - {body}");
            return Err(AriaError::network(format!(
                "{provider} API returned HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown error")
            ))
            .build());
        }

        let body = response.text().map_err(|e| {
            AriaError::network(format!("Failed to read {provider} response")).with_source(e)
        })?;
        let parsed: CompletionResponse = serde_json::from_str(&body)
            .map_err(|e| AriaError::parse(format!("Unexpected {provider} response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AriaError::parse(format!("{provider} response contained no choices")))
    }
}
