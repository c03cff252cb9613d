//! Ollama invoker
//!
//! Locally addressed model server speaking the Ollama chat API.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::llm::transport::{InvokeError, Transport};
use crate::llm::LlmInvoker;

/// Local Ollama backend
#[derive(Debug)]
pub struct OllamaInvoker {
    /// Base URL (e.g., http://localhost:11434)
    base_url: String,
    /// Model name (e.g., llama3.2)
    model: String,
    /// HTTP transport
    transport: Transport,
}

impl OllamaInvoker {
    pub fn new(base_url: String, model: String) -> Result<Self, InvokeError> {
        Ok(Self {
            base_url,
            model,
            transport: Transport::real()?,
        })
    }

    /// Create invoker with custom transport (for testing)
    pub fn with_transport(base_url: String, model: String, transport: Transport) -> Self {
        Self {
            base_url,
            model,
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
            "stream": false,
            "options": {"temperature": 0}
        })
        .to_string()
    }

    /// Extract completion text from the response body
    fn extract_content(&self, response: &str) -> Result<String, InvokeError> {
        let json: JsonValue = serde_json::from_str(response)?;

        let content = json
            .get("message")
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .ok_or_else(|| InvokeError::InvalidResponse("Missing message.content".to_string()))?;

        Ok(content.to_string())
    }
}

#[async_trait]
impl LlmInvoker for OllamaInvoker {
    async fn invoke(&self, prompt: &str) -> Result<String, InvokeError> {
        let url = format!("{}/api/chat", self.base_url.trim_end_matches('/'));
        let body = self.build_request(prompt);

        let response = self.transport.post_json(&url, &[], body).await?;
        self.extract_content(&response)
    }

    fn provider_name(&self) -> &str {
        "ollama"
    }
}
