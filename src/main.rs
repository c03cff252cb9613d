//! Project Intelligence API service entry point
//!
//! Startup order: env → logging → settings → invoker construction (fail
//! fast on a bad provider config) → context source selection → HTTP server.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use project_intel_api::{ApiConfig, ApiServer};
use project_intel_core::{create_invoker, ContextSource, LlmInvoker, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env();

    // A bad provider config aborts here, before any model call is attempted
    let invoker = create_invoker(&settings).context("failed to initialize LLM backend")?;
    info!(provider = invoker.provider_name(), "model backend ready");

    let context = ContextSource::from_settings(&settings)
        .context("failed to initialize dashboard client")?;
    match &context {
        ContextSource::Mock => info!("using mock dashboard context"),
        ContextSource::Live(_) => info!("using live dashboard context"),
    }

    let config = ApiConfig {
        host: settings.host.clone(),
        port: settings.port,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    ApiServer::new(config, invoker, context).start().await
}
