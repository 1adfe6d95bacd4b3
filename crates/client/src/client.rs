//! Blocking HTTP client for the style service.

use std::time::Duration;

/// Transport configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the service, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 60,
        }
    }
}

/// Error type for style service operations.
#[derive(Debug)]
pub enum ClientError {
    /// Network error (connection, timeout, TLS).
    Network(String),
    /// HTTP error with status code and response body.
    Http(u16, String),
    /// The service answered 200 but its payload reports a failure.
    Service(String),
    /// Response body was not the expected shape.
    Parse(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Network(msg) => write!(f, "Network error: {}", msg),
            ClientError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            ClientError::Service(msg) => write!(f, "Service error: {}", msg),
            ClientError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

/// The style service operations. `StyleClient` is the real transport;
/// the worker is generic over this trait so it can be tested offline.
pub trait StyleApi {
    /// Delete a style record by name.
    fn delete_style(&self, style: &str) -> Result<(), ClientError>;

    /// Move a style record under a new prefix.
    fn move_style(&self, style: &str, new_prefix: &str) -> Result<(), ClientError>;

    /// Liveness probe. Returns the service's identification string.
    fn check_api(&self) -> Result<String, ClientError>;
}

/// Style service API client (blocking).
#[derive(Clone)]
pub struct StyleClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl StyleClient {
    pub fn new(config: &ClientConfig) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("stylegrid/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Full URL for an endpoint path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::blocking::Response, ClientError> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Http(status, body));
        }

        Ok(response)
    }
}

impl StyleApi for StyleClient {
    fn delete_style(&self, style: &str) -> Result<(), ClientError> {
        self.post_json(
            "/style-editor/delete-style",
            &serde_json::json!({ "style": style }),
        )?;
        Ok(())
    }

    fn move_style(&self, style: &str, new_prefix: &str) -> Result<(), ClientError> {
        self.post_json(
            "/style-editor/move-style",
            &serde_json::json!({ "style": style, "new_prefix": new_prefix }),
        )?;
        Ok(())
    }

    fn check_api(&self) -> Result<String, ClientError> {
        let resp = self.post_json("/style-editor/check-api", &serde_json::json!({}))?;
        let json: serde_json::Value = resp
            .json()
            .map_err(|e| ClientError::Parse(e.to_string()))?;
        ack_value(&json)
    }
}

/// Extract the identification string from a check-api ack. A body carrying
/// an `error` field is a service-level failure even under HTTP 200.
fn ack_value(json: &serde_json::Value) -> Result<String, ClientError> {
    if let Some(msg) = json["error"].as_str() {
        return Err(ClientError::Service(msg.to_string()));
    }
    json["value"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| ClientError::Parse("Missing value in response".into()))
}
