//! Gemini client (Generative Language API, API-key auth)

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use crate::infrastructure::ports::{ProviderError, ProviderInvocation, ProviderPort};

/// Default Generative Language API base URL.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self::with_base_url(DEFAULT_GEMINI_BASE_URL, api_key, model)
    }

    pub fn with_base_url(base_url: &str, api_key: &str, model: &str) -> Self {
        let client = Client::builder().build().unwrap_or_else(|_| Client::new());

        // Trim the API key at construction so stray whitespace from .env files
        // doesn't end up in the header
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

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn build_body(invocation: &ProviderInvocation) -> Value {
        json!({
            "systemInstruction": {
                "parts": [{ "text": invocation.system_prompt }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": invocation.user_prompt }]
            }],
            "generationConfig": {
                "temperature": invocation.temperature,
                "responseMimeType": "application/json"
            }
        })
    }
}

#[async_trait]
impl ProviderPort for GeminiClient {
    async fn invoke(&self, invocation: ProviderInvocation) -> Result<String, ProviderError> {
        let body = Self::build_body(&invocation);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .timeout(Duration::from_millis(invocation.timeout_ms))
            .json(&body)
            .send()
            .await
            .map_err(ProviderError::request_failed)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::RequestFailed(format!("{}: {}", status, text)));
        }

        let json: Value = response
            .json()
            .await
            .map_err(ProviderError::invalid_response)?;

        extract_text(&json)
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(json: &Value) -> Result<String, ProviderError> {
    let parts = json["candidates"]
        .as_array()
        .and_then(|arr| arr.first())
        .and_then(|c| c["content"]["parts"].as_array())
        .ok_or_else(|| ProviderError::invalid_response("Missing candidate content"))?;

    let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();

    if text.trim().is_empty() {
        return Err(ProviderError::invalid_response("Candidate has no text"));
    }
    Ok(text)
}
