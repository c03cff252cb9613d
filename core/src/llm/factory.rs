//! Invoker factory
//!
//! Creates the configured model backend. Construction failures (missing
//! credential, unknown provider) are fatal and reported before any network
//! call is attempted, and never retried silently.

use tracing::info;

use crate::config::Settings;
use crate::llm::ollama::OllamaInvoker;
use crate::llm::openai::OpenAiInvoker;
use crate::llm::stub::StubInvoker;
use crate::llm::transport::InvokeError;
use crate::llm::Invoker;

/// Build the invoker selected by `LLM_PROVIDER`.
pub fn create_invoker(settings: &Settings) -> Result<Invoker, InvokeError> {
    match settings.llm_provider.as_str() {
        "ollama" => {
            info!(
                model = %settings.ollama_model,
                base_url = %settings.ollama_base_url,
                "loading Ollama backend"
            );
            Ok(Invoker::Ollama(OllamaInvoker::new(
                settings.ollama_base_url.clone(),
                settings.ollama_model.clone(),
            )?))
        }
        "openai" => {
            let api_key = settings.openai_api_key.clone().ok_or_else(|| {
                InvokeError::Configuration("OPENAI_API_KEY is not set".to_string())
            })?;
            info!(model = %settings.openai_model, "loading OpenAI backend");
            Ok(Invoker::OpenAi(OpenAiInvoker::new(
                settings.openai_base_url.clone(),
                settings.openai_model.clone(),
                api_key,
            )?))
        }
        "stub" => Ok(Invoker::Stub(StubInvoker::new())),
        other => Err(InvokeError::Configuration(format!(
            "Unknown LLM provider: {}",
            other
        ))),
    }
}
