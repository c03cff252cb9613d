//! Application configuration
//!
//! Settings are read from the environment once at process start and passed
//! by reference into the components that need them. Nothing reads the
//! environment after startup.

use tracing::warn;

/// Application settings (environment-sourced)
#[derive(Debug, Clone)]
pub struct Settings {
    /// Model backend selector: "openai" (default), "ollama", or "stub"
    pub llm_provider: String,
    /// Credential for the hosted OpenAI backend
    pub openai_api_key: Option<String>,
    /// Model identifier for the hosted backend
    pub openai_model: String,
    /// Endpoint for the hosted backend
    pub openai_base_url: String,
    /// Model identifier for the local Ollama backend
    pub ollama_model: String,
    /// Endpoint for the local Ollama backend
    pub ollama_base_url: String,
    /// Close Loop Analytics dashboard endpoint; unset means mock context
    pub dashboard_base_url: Option<String>,
    /// Reserved; not exercised by the live path
    pub database_url: Option<String>,
    /// HTTP bind host
    pub host: String,
    /// HTTP bind port
    pub port: u16,
}

impl Settings {
    /// Read settings from the environment, applying defaults.
    ///
    /// Never fails: provider validation happens at invoker construction,
    /// where a missing credential can be reported with a clear cause.
    pub fn from_env() -> Self {
        Self {
            llm_provider: env_or("LLM_PROVIDER", "openai").to_lowercase(),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            openai_model: env_or("OPENAI_MODEL", "gpt-4o"),
            openai_base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            ollama_model: env_or("OLLAMA_MODEL", "llama3.2"),
            ollama_base_url: env_or("OLLAMA_BASE_URL", "http://localhost:11434"),
            dashboard_base_url: std::env::var("DASHBOARD_BASE_URL").ok(),
            database_url: std::env::var("DATABASE_URL").ok(),
            host: env_or("HOST", "0.0.0.0"),
            port: parse_port(std::env::var("PORT").ok()),
        }
    }
}

impl Default for Settings {
    /// Defaults equivalent to an empty environment.
    fn default() -> Self {
        Self {
            llm_provider: "openai".to_string(),
            openai_api_key: None,
            openai_model: "gpt-4o".to_string(),
            openai_base_url: "https://api.openai.com/v1".to_string(),
            ollama_model: "llama3.2".to_string(),
            ollama_base_url: "http://localhost:11434".to_string(),
            dashboard_base_url: None,
            database_url: None,
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse the bind port, warning when a set value is unusable.
fn parse_port(raw: Option<String>) -> u16 {
    match raw {
        None => 8000,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(value = %raw, "unparseable PORT value, falling back to 8000");
            8000
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.llm_provider, "openai");
        assert_eq!(settings.ollama_model, "llama3.2");
        assert_eq!(settings.ollama_base_url, "http://localhost:11434");
        assert_eq!(settings.port, 8000);
        assert!(settings.openai_api_key.is_none());
        assert!(settings.dashboard_base_url.is_none());
    }

    #[test]
    fn test_parse_port_handles_unset_valid_and_garbage() {
        assert_eq!(parse_port(None), 8000);
        assert_eq!(parse_port(Some("9001".to_string())), 9001);
        assert_eq!(parse_port(Some("not-a-port".to_string())), 8000);
        assert_eq!(parse_port(Some("99999".to_string())), 8000);
    }
}
