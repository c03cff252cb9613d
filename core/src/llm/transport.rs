//! HTTP transport for model invokers
//!
//! Thin abstraction over the HTTP client so invoker logic can be tested
//! against fixture responses instead of live endpoints.

use std::time::Duration;

/// Upper bound on a single model invocation. An unbounded wait on a
/// third-party model endpoint is an availability risk.
const INVOKE_TIMEOUT: Duration = Duration::from_secs(60);

/// Model invocation errors.
///
/// Kinds are kept distinct so logs can tell transient network trouble from
/// authentication failures and malformed responses, even though the HTTP
/// surface flattens them into one message.
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    /// Missing/invalid provider selection or credential; fatal, never retried
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Connection refused, timeout, DNS failure
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response from the backend
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// Rejected credential (401/403)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Response body did not carry the expected completion payload
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<serde_json::Error> for InvokeError {
    fn from(err: serde_json::Error) -> Self {
        InvokeError::InvalidResponse(err.to_string())
    }
}

/// Map a non-success status to the matching error kind.
pub(crate) fn status_error(status: u16, message: String) -> InvokeError {
    if status == 401 || status == 403 {
        InvokeError::Authentication(message)
    } else {
        InvokeError::Http { status, message }
    }
}

/// Concrete transport enum.
///
/// Wraps the real client and the test fake, avoiding dyn dispatch.
#[derive(Debug)]
pub enum Transport {
    Real(HttpTransport),
    Fake(FakeTransport),
}

impl Transport {
    /// POST a JSON body and return the response body.
    pub async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: String,
    ) -> Result<String, InvokeError> {
        match self {
            Transport::Real(t) => t.post_json(url, headers, body).await,
            Transport::Fake(t) => t.post_json(),
        }
    }
}

impl Transport {
    /// Real transport with the invocation timeout applied.
    ///
    /// Builder failure is surfaced rather than degraded to a client
    /// without a timeout.
    pub fn real() -> Result<Self, InvokeError> {
        Ok(Transport::Real(HttpTransport::new()?))
    }
}

/// Real HTTP transport backed by reqwest
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, InvokeError> {
        let client = reqwest::Client::builder()
            .timeout(INVOKE_TIMEOUT)
            .build()
            .map_err(|e| {
                InvokeError::Configuration(format!("failed to build HTTP client: {}", e))
            })?;
        Ok(Self { client })
    }

    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: String,
    ) -> Result<String, InvokeError> {
        let mut request = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .body(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.map_err(network_error)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(network_error)?;

        if !(200..300).contains(&status) {
            return Err(status_error(status, text));
        }
        Ok(text)
    }
}

fn network_error(err: reqwest::Error) -> InvokeError {
    if err.is_timeout() {
        InvokeError::Network(format!("request timed out: {}", err))
    } else {
        InvokeError::Network(err.to_string())
    }
}

/// Fake transport for testing (uses fixture strings)
#[derive(Debug)]
pub struct FakeTransport {
    /// Response body to return
    response_body: String,
    /// Non-success status to simulate (if set)
    status: Option<u16>,
    /// Network error message to return (if set)
    error_message: Option<String>,
}

impl FakeTransport {
    /// Fake transport that succeeds with the given body
    pub fn new(response: &str) -> Self {
        Self {
            response_body: response.to_string(),
            status: None,
            error_message: None,
        }
    }

    /// Fake transport that fails with a non-success status
    pub fn with_status(status: u16, body: &str) -> Self {
        Self {
            response_body: body.to_string(),
            status: Some(status),
            error_message: None,
        }
    }

    /// Fake transport that fails with a network error
    pub fn with_error(msg: &str) -> Self {
        Self {
            response_body: String::new(),
            status: None,
            error_message: Some(msg.to_string()),
        }
    }

    fn post_json(&self) -> Result<String, InvokeError> {
        if let Some(ref msg) = self.error_message {
            return Err(InvokeError::Network(msg.clone()));
        }
        if let Some(status) = self.status {
            return Err(status_error(status, self.response_body.clone()));
        }
        Ok(self.response_body.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_transport_success() {
        let transport = Transport::Fake(FakeTransport::new("test response"));
        let result = transport.post_json("http://test", &[], "{}".to_string()).await;
        assert_eq!(result.unwrap(), "test response");
    }

    #[tokio::test]
    async fn test_fake_transport_network_error() {
        let transport = Transport::Fake(FakeTransport::with_error("connection refused"));
        let result = transport.post_json("http://test", &[], "{}".to_string()).await;
        assert!(matches!(result, Err(InvokeError::Network(_))));
    }

    #[test]
    fn test_real_transport_construction_carries_timeout() {
        // Construction either succeeds with the timeout applied or errors;
        // there is no silent fallback path
        assert!(Transport::real().is_ok());
    }

    #[test]
    fn test_status_error_distinguishes_authentication() {
        assert!(matches!(
            status_error(401, "bad key".to_string()),
            InvokeError::Authentication(_)
        ));
        assert!(matches!(
            status_error(403, "forbidden".to_string()),
            InvokeError::Authentication(_)
        ));
        assert!(matches!(
            status_error(500, "oops".to_string()),
            InvokeError::Http { status: 500, .. }
        ));
    }

    #[test]
    fn test_invoke_error_display() {
        let err = InvokeError::Http {
            status: 429,
            message: "slow down".to_string(),
        };
        assert_eq!(format!("{}", err), "HTTP error 429: slow down");

        let err = InvokeError::Configuration("OPENAI_API_KEY is not set".to_string());
        assert!(format!("{}", err).contains("Configuration error"));
    }
}
