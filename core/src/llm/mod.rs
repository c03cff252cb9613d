//! Model Invokers
//!
//! Provider-agnostic interface to completion backends. Two live providers
//! (OpenAI-compatible hosted API, local Ollama server) plus a stub for
//! tests, selected by a configuration-driven factory.
//!
//! Sampling temperature is fixed at zero in every live request body so the
//! downstream parse is reproducible.

pub mod factory;
pub mod ollama;
pub mod openai;
pub mod stub;
pub mod transport;

use async_trait::async_trait;

pub use factory::create_invoker;
pub use ollama::OllamaInvoker;
pub use openai::OpenAiInvoker;
pub use stub::StubInvoker;
pub use transport::{FakeTransport, InvokeError, Transport};

/// Completion backend interface.
///
/// Consumes a prompt string, returns the raw (unsanitized) model text.
#[async_trait]
pub trait LlmInvoker: Send + Sync {
    async fn invoke(&self, prompt: &str) -> Result<String, InvokeError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;
}

/// Concrete invoker enum, one variant per provider.
///
/// Enum dispatch keeps call sites free of trait objects.
#[derive(Debug)]
pub enum Invoker {
    OpenAi(OpenAiInvoker),
    Ollama(OllamaInvoker),
    Stub(StubInvoker),
}

#[async_trait]
impl LlmInvoker for Invoker {
    async fn invoke(&self, prompt: &str) -> Result<String, InvokeError> {
        match self {
            Invoker::OpenAi(i) => i.invoke(prompt).await,
            Invoker::Ollama(i) => i.invoke(prompt).await,
            Invoker::Stub(i) => i.invoke(prompt).await,
        }
    }

    fn provider_name(&self) -> &str {
        match self {
            Invoker::OpenAi(i) => i.provider_name(),
            Invoker::Ollama(i) => i.provider_name(),
            Invoker::Stub(i) => i.provider_name(),
        }
    }
}
