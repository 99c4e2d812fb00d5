//! Groq client (OpenAI-compatible chat completions API)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::infrastructure::ports::{ProviderError, ProviderInvocation, ProviderPort};

/// Default Groq base URL.
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com";

/// Client for Groq's OpenAI-compatible API
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GroqClient {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self::with_base_url(DEFAULT_GROQ_BASE_URL, api_key, model)
    }

    /// Create client against a custom endpoint (proxies, local mocks).
    pub fn with_base_url(base_url: &str, api_key: &str, model: &str) -> Self {
        // Timeouts are applied per request from the invocation.
        let client = Client::builder().build().unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
            model: model.to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, invocation: &ProviderInvocation) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Some(invocation.system_prompt.clone()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Some(invocation.user_prompt.clone()),
                },
            ],
            temperature: Some(invocation.temperature),
            response_format: Some(ResponseFormat {
                r#type: "json_object".to_string(),
            }),
        }
    }
}

#[async_trait]
impl ProviderPort for GroqClient {
    async fn invoke(&self, invocation: ProviderInvocation) -> Result<String, ProviderError> {
        let api_request = self.build_request(&invocation);

        let response = self
            .client
            .post(format!("{}/openai/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_millis(invocation.timeout_ms))
            .json(&api_request)
            .send()
            .await
            .map_err(ProviderError::request_failed)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .map_err(ProviderError::request_failed)?;
            return Err(ProviderError::RequestFailed(format!(
                "{}: {}",
                status, error_text
            )));
        }

        let api_response: ChatResponse = response
            .json()
            .await
            .map_err(ProviderError::invalid_response)?;

        extract_content(api_response)
    }
}

fn extract_content(response: ChatResponse) -> Result<String, ProviderError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::invalid_response("No choices in response"))?;

    choice
        .message
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ProviderError::invalid_response("Empty message content"))
}

// =============================================================================
// OpenAI API types
// =============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    r#type: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize, Default)]
struct ChatChoice {
    message: ChatMessage,
}
