use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Transport-level failure classification. Every variant is retryable; the
/// distinction only matters for logging.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("protocol error: {0}")]
    Http(String),

    #[error("transport error: {0}")]
    Other(String),
}

/// One complete HTTP response. Receiving one of these counts as a successful
/// attempt regardless of status code; whether the body is decodable is a
/// separate question answered by the collection job.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// A single authenticated GET. Split out as a trait so the retry loop can be
/// exercised against a scripted transport in tests.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError>;
}

/// reqwest-backed transport with basic auth and a per-attempt timeout.
///
/// Certificate verification is disabled: CMX appliances commonly run
/// self-signed certificates inside the management network.
pub struct HttpTransport {
    client: reqwest::Client,
    username: String,
    password: String,
}

impl HttpTransport {
    pub fn new(
        username: &str,
        password: &str,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self {
            client,
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(classify)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;

        Ok(TransportResponse { status, body })
    }
}

fn classify(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(e.to_string())
    } else if e.is_connect() {
        TransportError::Connect(e.to_string())
    } else if e.is_status() || e.is_decode() {
        TransportError::Http(e.to_string())
    } else {
        TransportError::Other(e.to_string())
    }
}
