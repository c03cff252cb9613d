//! Stub invoker
//!
//! Returns canned responses without network calls. Used by tests and by
//! the `stub` provider selection when no real backend is available.

use async_trait::async_trait;

use crate::llm::transport::InvokeError;
use crate::llm::LlmInvoker;
use crate::prompt::EXAMPLE_JSON;

/// Stub backend (returns a fixed response)
#[derive(Debug)]
pub struct StubInvoker {
    /// Canned response to return
    response: String,
}

impl StubInvoker {
    /// Stub that answers with the canonical example report
    pub fn new() -> Self {
        Self {
            response: EXAMPLE_JSON.to_string(),
        }
    }

    /// Stub with a custom response
    pub fn with_response(response: String) -> Self {
        Self { response }
    }
}

impl Default for StubInvoker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmInvoker for StubInvoker {
    async fn invoke(&self, _prompt: &str) -> Result<String, InvokeError> {
        Ok(self.response.clone())
    }

    fn provider_name(&self) -> &str {
        "stub"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_returns_example_report_by_default() {
        let invoker = StubInvoker::new();
        let content = invoker.invoke("prompt").await.unwrap();
        assert!(content.contains("Project Alpha"));
    }

    #[tokio::test]
    async fn test_stub_with_custom_response() {
        let invoker = StubInvoker::with_response("custom".to_string());
        assert_eq!(invoker.invoke("prompt").await.unwrap(), "custom");
        assert_eq!(invoker.provider_name(), "stub");
    }
}
