//! Summarization pipeline
//!
//! Orchestrates fetch → build → invoke → sanitize → parse in strict order;
//! each stage depends on the previous one's output, so there is nothing to
//! overlap.

use tracing::{debug, warn};

use crate::context::ContextSource;
use crate::llm::{InvokeError, Invoker, LlmInvoker};
use crate::prompt::{build_prompt, EXAMPLE_JSON};
use crate::report::{parse_report, ParseError, SummaryReport};
use crate::sanitize::sanitize;

/// Failures crossing the pipeline boundary
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("LLM invocation failed: {0}")]
    Invocation(#[from] InvokeError),

    #[error("Failed to parse model output: {0}")]
    Parse(#[from] ParseError),
}

/// Run one summarization request end to end.
pub async fn run_summarization(
    invoker: &Invoker,
    context: &ContextSource,
) -> Result<SummaryReport, PipelineError> {
    let context = context.fetch().await;
    let context_json = context.to_json_string();

    let prompt = build_prompt(&context_json, EXAMPLE_JSON);
    debug!(
        provider = invoker.provider_name(),
        prompt_len = prompt.len(),
        "invoking model backend"
    );

    let raw = invoker.invoke(&prompt).await?;
    let candidate = sanitize(&raw);

    match parse_report(&candidate) {
        Ok(report) => Ok(report),
        Err(e) => {
            // Raw text goes to the log for operator diagnosis, never to the client
            warn!(error = %e, candidate = %candidate, "model output failed validation");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::StubInvoker;

    #[tokio::test]
    async fn test_pipeline_with_clean_example_output() {
        let invoker = Invoker::Stub(StubInvoker::new());
        let report = run_summarization(&invoker, &ContextSource::Mock)
            .await
            .unwrap();
        assert_eq!(report.project_name, "Project Alpha");
        assert_eq!(report.activity_log.len(), 2);
    }

    #[tokio::test]
    async fn test_pipeline_strips_fences_before_parsing() {
        let fenced = format!("```json\n{}\n```", crate::prompt::EXAMPLE_JSON);
        let invoker = Invoker::Stub(StubInvoker::with_response(fenced));
        let report = run_summarization(&invoker, &ContextSource::Mock)
            .await
            .unwrap();
        assert_eq!(report.project_name, "Project Alpha");
    }

    #[tokio::test]
    async fn test_pipeline_surfaces_parse_failure() {
        let invoker = Invoker::Stub(StubInvoker::with_response("not json at all".to_string()));
        let result = run_summarization(&invoker, &ContextSource::Mock).await;
        assert!(matches!(result, Err(PipelineError::Parse(_))));
    }
}
