//! Project Intelligence API
//!
//! HTTP surface for the summarization pipeline: one metadata endpoint and
//! one summarize endpoint. Everything else lives in `project-intel-core`.

pub mod handlers;
pub mod models;
pub mod server;

pub use handlers::{router, ApiState};
pub use models::{ApiConfig, SummaryRequest, SummaryResponse};
pub use server::ApiServer;
