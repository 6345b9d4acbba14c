//! OpenAI-compatible chat-completions client.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tbforge_config::GeneratorConfig;

use crate::error::GeneratorError;
use crate::generator::{GenerationRequest, TextGenerator};

/// Chat-completions client over blocking HTTP.
///
/// Available only when an API key was supplied; without one, no request is
/// ever sent.
pub struct ChatClient {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    client: Client,
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
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatClient {
    /// Creates a client for the configured endpoint and model.
    pub fn new(config: &GeneratorConfig, api_key: Option<String>) -> Result<Self, GeneratorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeneratorError::Transport {
                endpoint: config.endpoint.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: api_key.filter(|key| !key.is_empty()),
            client,
        })
    }

    /// Returns the model name sent with each request.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn body<'a>(&'a self, request: &GenerationRequest<'a>) -> ChatRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system_prompt {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: request.prompt,
        });
        ChatRequest {
            model: &self.model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

/// Pulls the first choice's text out of a decoded reply.
fn first_choice(response: ChatResponse) -> Result<String, GeneratorError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.unwrap_or_default())
        .ok_or(GeneratorError::NoChoices)
}

impl TextGenerator for ChatClient {
    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, GeneratorError> {
        let Some(api_key) = &self.api_key else {
            return Err(GeneratorError::Unavailable);
        };

        log::debug!(
            "requesting completion from {} (model {}, {} prompt chars)",
            self.endpoint,
            self.model,
            request.prompt.len()
        );
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&self.body(request))
            .send()
            .map_err(|e| GeneratorError::Transport {
                endpoint: self.endpoint.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeneratorError::Status {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let reply: ChatResponse = response.json().map_err(|e| GeneratorError::Decode {
            reason: e.to_string(),
        })?;
        first_choice(reply)
    }
}
