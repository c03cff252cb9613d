//! OpenAI invoker
//!
//! OpenAI-compatible chat-completions HTTP API.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::llm::transport::{InvokeError, Transport};
use crate::llm::LlmInvoker;

/// Hosted OpenAI-compatible backend
#[derive(Debug)]
pub struct OpenAiInvoker {
    /// Base URL (e.g., https://api.openai.com/v1)
    base_url: String,
    /// Model name (e.g., gpt-4o)
    model: String,
    /// API key
    api_key: String,
    /// HTTP transport
    transport: Transport,
}

impl OpenAiInvoker {
    pub fn new(base_url: String, model: String, api_key: String) -> Result<Self, InvokeError> {
        Ok(Self {
            base_url,
            model,
            api_key,
            transport: Transport::real()?,
        })
    }

    /// Create invoker with custom transport (for testing)
    pub fn with_transport(
        base_url: String,
        model: String,
        api_key: String,
        transport: Transport,
    ) -> Self {
        Self {
            base_url,
            model,
            api_key,
            transport,
        }
    }

    /// Build chat request body. Temperature is pinned to zero.
    fn build_request(&self, prompt: &str) -> String {
        serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "user", "content": prompt}
            ],
            "temperature": 0,
            "stream": false
        })
        .to_string()
    }

    /// Extract completion text from the response body
    fn extract_content(&self, response: &str) -> Result<String, InvokeError> {
        let json: JsonValue = serde_json::from_str(response)?;

        let content = json["choices"]
            .get(0)
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .ok_or_else(|| {
                InvokeError::InvalidResponse("Missing choices[0].message.content".to_string())
            })?;

        Ok(content.to_string())
    }
}

#[async_trait]
impl LlmInvoker for OpenAiInvoker {
    async fn invoke(&self, prompt: &str) -> Result<String, InvokeError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = self.build_request(prompt);

        let auth_header = format!("Bearer {}", self.api_key);
        let headers = [("Authorization", auth_header.as_str())];

        let response = self.transport.post_json(&url, &headers, body).await?;
        self.extract_content(&response)
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}
