//! API Server Module
//!
//! Server setup and startup for the Project Intelligence API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use project_intel_core::{ContextSource, Invoker};

use crate::handlers::{router, ApiState};
use crate::models::ApiConfig;

/// Main API server
pub struct ApiServer {
    /// Server configuration
    config: ApiConfig,
    /// Shared state
    state: Arc<ApiState>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: ApiConfig, invoker: Invoker, context: ContextSource) -> Self {
        let state = Arc::new(ApiState { invoker, context });
        Self { config, state }
    }

    /// Start the API server
    pub async fn start(&self) -> Result<()> {
        info!(
            "Starting Project Intelligence API v{} on {}:{}",
            self.config.version, self.config.host, self.config.port
        );

        let app = router(self.state.clone());

        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;
        info!("Project Intelligence API listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to start API server: {}", e))?;

        Ok(())
    }
}
