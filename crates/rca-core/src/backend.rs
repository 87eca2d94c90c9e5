//! Inference backends
//!
//! [`ChatBackend`] is the single external I/O boundary: one request with a
//! system and a user message, one raw text reply. [`OllamaClient`] talks to a
//! local Ollama server over its `/api/chat` endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::OllamaConfig;
use crate::error::RcaError;
use crate::Result;

/// Message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single role-tagged chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Output format hint sent with the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    Json,
}

/// Everything needed for one inference call
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub format: ResponseFormat,
    pub temperature: f32,
}

/// A chat-completion style model service
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send the request and return the model's raw text reply
    async fn chat(&self, request: &ChatRequest) -> Result<String>;
}

// ---------------------------------------------------------------------------
// Ollama wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct OllamaChatBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    format: ResponseFormat,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct OllamaChatReply {
    message: ChatMessage,
}

/// Client for a local Ollama server
pub struct OllamaClient {
    config: OllamaConfig,
    http_client: reqwest::Client,
}

impl OllamaClient {
    /// Create a new Ollama client
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("rca-agent/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(OllamaClient {
            config,
            http_client,
        })
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.config.host)
    }
}

#[async_trait]
impl ChatBackend for OllamaClient {
    async fn chat(&self, request: &ChatRequest) -> Result<String> {
        let url = self.chat_url();
        info!(model = %request.model, %url, "sending chat request");

        let body = OllamaChatBody {
            model: &request.model,
            messages: &request.messages,
            format: request.format,
            stream: false,
            options: OllamaOptions {
                temperature: request.temperature,
            },
        };

        let response = self.http_client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(RcaError::Inference(format!(
                "{} returned {}: {}",
                url,
                status,
                text.trim()
            )));
        }

        let reply: OllamaChatReply = response.json().await?;
        debug!(bytes = reply.message.content.len(), "received chat reply");
        Ok(reply.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ollama_body_shape() {
        let messages = vec![ChatMessage::system("sys"), ChatMessage::user("usr")];
        let body = OllamaChatBody {
            model: "llama3.2",
            messages: &messages,
            format: ResponseFormat::Json,
            stream: false,
            options: OllamaOptions { temperature: 0.5 },
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "model": "llama3.2",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "usr"}
                ],
                "format": "json",
                "stream": false,
                "options": {"temperature": 0.5}
            })
        );
    }

    #[test]
    fn test_ollama_reply_ignores_extra_fields() {
        let reply: OllamaChatReply = serde_json::from_value(json!({
            "model": "llama3.2",
            "created_at": "2026-01-01T00:00:00Z",
            "message": {"role": "assistant", "content": "{}"},
            "done": true,
            "total_duration": 1234
        }))
        .unwrap();
        assert_eq!(reply.message.role, Role::Assistant);
        assert_eq!(reply.message.content, "{}");
    }

    #[test]
    fn test_chat_url() {
        let client = OllamaClient::new(OllamaConfig::new("localhost:11434")).unwrap();
        assert_eq!(client.chat_url(), "http://localhost:11434/api/chat");
    }
}
