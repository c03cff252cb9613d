//! Project Intelligence Core
//!
//! The summarization pipeline: dashboard context → prompt → model
//! invocation → output sanitization → schema validation.
//!
//! Data flows strictly forward through those stages; no stage calls back
//! upstream. The HTTP surface lives in `project-intel-api`.

pub mod config;
pub mod context;
pub mod llm;
pub mod pipeline;
pub mod prompt;
pub mod report;
pub mod sanitize;

pub use config::Settings;
pub use context::{ContextSource, DashboardContext};
pub use llm::{create_invoker, InvokeError, Invoker, LlmInvoker};
pub use pipeline::{run_summarization, PipelineError};
pub use report::{parse_report, ParseError, SummaryReport};
pub use sanitize::sanitize;
