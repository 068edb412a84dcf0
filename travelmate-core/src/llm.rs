//! Chat completion client for the Groq OpenAI-compatible API
//!
//! Wire types plus two entry points: [`LlmClient::chat_completion`] for
//! callers that want the failure reason, and [`LlmClient::generate_reply`]
//! for the orchestration path, where any failure turns into an inline error
//! string that is stored and rendered like a normal assistant reply.

use crate::http::get_completion_client;
use crate::models::ModelParams;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

/// Production Groq endpoint; override via [`LlmClient::new`] or GROQ_BASE_URL
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Fixed persona sent as the system message with every completion
pub const SYSTEM_PROMPT: &str = "You are TravelMate AI, a friendly travel assistant.";

/// Prefix of the inline reply produced when a completion fails
pub const ERROR_PREFIX: &str = "⚠️ Terjadi error saat memanggil model";

/// Why a chat completion failed
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion API error {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid completion response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no response content from API (empty choices)")]
    EmptyChoices,
}

/// Request payload for the chat completions API
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// Create a new chat request with a single user message
    pub fn new(model: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![Message::user(content)],
            temperature: None,
            top_p: None,
            max_tokens: None,
        }
    }

    /// Prepend a system message
    pub fn system(mut self, content: impl Into<String>) -> Self {
        self.messages.insert(0, Message::system(content));
        self
    }

    /// Set the temperature for sampling
    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Set the nucleus sampling cutoff
    pub fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Set the maximum number of tokens in the response
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }
}

/// A message in the chat conversation
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Response from the chat completions API
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl ChatResponse {
    /// Get the content of the first choice, if available
    pub fn content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }

    /// Get the content of the first choice, or an error if not available
    pub fn content_or_err(&self) -> Result<&str, CompletionError> {
        self.content().ok_or(CompletionError::EmptyChoices)
    }
}

/// A single response choice
#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
    #[serde(default)]
    pub index: usize,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The message content in a response choice
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Client for the completion provider
#[derive(Debug, Clone)]
pub struct LlmClient {
    base_url: String,
}

impl Default for LlmClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl LlmClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Send a chat completion request, surfacing the failure reason
    pub async fn chat_completion(
        &self,
        request: &ChatRequest,
        api_key: &str,
    ) -> Result<ChatResponse, CompletionError> {
        let start = Instant::now();

        let response = get_completion_client()
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let duration_ms = start.elapsed().as_millis();

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(
                status = %status,
                duration_ms = %duration_ms,
                "completion API error"
            );
            return Err(CompletionError::Api { status, body });
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)?;

        info!(
            model = %request.model,
            duration_ms = %duration_ms,
            "completion call finished"
        );

        Ok(parsed)
    }

    /// Generate a reply for the composed prompt
    ///
    /// Sends the fixed [`SYSTEM_PROMPT`] persona plus the user prompt with
    /// the given sampling parameters. Never fails: any error comes back as
    /// an inline `"⚠️ Terjadi error saat memanggil model: …"` string that
    /// callers store and display like a normal reply.
    pub async fn generate_reply(
        &self,
        prompt: &str,
        api_key: &str,
        model: &str,
        params: &ModelParams,
    ) -> String {
        let params = params.clamped();
        let request = ChatRequest::new(model, prompt)
            .system(SYSTEM_PROMPT)
            .temperature(params.temperature)
            .top_p(params.top_p)
            .max_tokens(params.max_tokens);

        let reply = match self.chat_completion(&request, api_key).await {
            Ok(response) => response.content_or_err().map(str::to_string),
            Err(err) => Err(err),
        };

        match reply {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "completion degraded to inline error reply");
                format!("{}: {}", ERROR_PREFIX, err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_builder() {
        let request = ChatRequest::new("llama-3.3-70b-versatile", "Halo")
            .system(SYSTEM_PROMPT)
            .temperature(0.3)
            .top_p(0.9)
            .max_tokens(400);

        assert_eq!(request.model, "llama-3.3-70b-versatile");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[0].content, SYSTEM_PROMPT);
        assert_eq!(request.messages[1].role, "user");
        assert_eq!(request.temperature, Some(0.3));
        assert_eq!(request.top_p, Some(0.9));
        assert_eq!(request.max_tokens, Some(400));
    }

    #[test]
    fn test_chat_request_skips_unset_sampling_fields() {
        let request = ChatRequest::new("m", "hi");
        let encoded = serde_json::to_string(&request).unwrap();
        assert!(!encoded.contains("temperature"));
        assert!(!encoded.contains("top_p"));
        assert!(!encoded.contains("max_tokens"));
    }

    #[test]
    fn test_message_constructors() {
        assert_eq!(Message::user("Hello").role, "user");
        assert_eq!(Message::system("persona").role, "system");
        assert_eq!(Message::assistant("Hi there").role, "assistant");
    }

    #[tokio::test]
    async fn test_generate_reply_returns_first_choice() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "test-model",
                "temperature": 0.3,
                "top_p": 0.9,
                "max_tokens": 400,
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "choices": [{"message": {"role": "assistant", "content": "Selamat datang di Bali!"}}],
                    "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
                }"#,
            )
            .create_async()
            .await;

        let client = LlmClient::new(server.url());
        let reply = client
            .generate_reply("halo", "test-key", "test-model", &ModelParams::default())
            .await;
        assert_eq!(reply, "Selamat datang di Bali!");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_reply_inlines_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error": "invalid api key"}"#)
            .create_async()
            .await;

        let client = LlmClient::new(server.url());
        let reply = client
            .generate_reply("halo", "bad-key", "test-model", &ModelParams::default())
            .await;
        assert!(reply.contains("Terjadi error saat memanggil model"));
        assert!(reply.contains("401"));
    }

    #[tokio::test]
    async fn test_generate_reply_inlines_transport_error() {
        let server = mockito::Server::new_async().await;
        let url = server.url();
        drop(server);

        let client = LlmClient::new(url);
        let reply = client
            .generate_reply("halo", "test-key", "test-model", &ModelParams::default())
            .await;
        assert!(reply.starts_with(ERROR_PREFIX));
    }

    #[tokio::test]
    async fn test_generate_reply_inlines_empty_choices() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let client = LlmClient::new(server.url());
        let reply = client
            .generate_reply("halo", "test-key", "test-model", &ModelParams::default())
            .await;
        assert!(reply.contains("Terjadi error saat memanggil model"));
    }

    #[tokio::test]
    async fn test_generate_reply_clamps_params() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "temperature": 1.0,
                "max_tokens": 64,
            })))
            .with_status(200)
            .with_body(r#"{"choices": [{"message": {"content": "ok"}}]}"#)
            .create_async()
            .await;

        let client = LlmClient::new(server.url());
        let params = ModelParams {
            temperature: 5.0,
            top_p: 0.9,
            max_tokens: 1,
        };
        let reply = client
            .generate_reply("halo", "test-key", "test-model", &params)
            .await;
        assert_eq!(reply, "ok");
        mock.assert_async().await;
    }
}
