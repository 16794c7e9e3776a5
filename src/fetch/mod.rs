pub mod transport;

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

pub use transport::{HttpTransport, Transport, TransportError, TransportResponse};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no response after {attempts} attempts, last error: {last}")]
    Exhausted { attempts: u32, last: TransportError },
}

/// A received HTTP response. The presence of this value means "no transport
/// error occurred"; callers still have to check the status code before
/// decoding the body.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

/// Performs one authenticated remote read with bounded retries.
pub struct FetchClient {
    transport: Arc<dyn Transport>,
    max_attempts: u32,
    retry_backoff: Duration,
}

impl FetchClient {
    pub fn new(transport: Arc<dyn Transport>, max_attempts: u32, retry_backoff: Duration) -> Self {
        Self {
            transport,
            max_attempts,
            retry_backoff,
        }
    }

    /// Bounded retry loop around the transport. Any transport failure waits
    /// `retry_backoff` and tries again, up to `max_attempts` calls total. Any
    /// received response terminates the loop, whatever its status code. The
    /// calling task blocks for the duration of the retries.
    pub async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            debug!(url = %url, attempt, max_attempts = self.max_attempts, "Requesting data");

            match self.transport.get(url).await {
                Ok(response) => {
                    info!(url = %url, status = response.status, attempt, "Got response");
                    return Ok(FetchResponse {
                        status: response.status,
                        body: response.body,
                    });
                }
                Err(e) => {
                    warn!(url = %url, attempt, error = %e, "Request failed");
                    last_error = Some(e);
                    if attempt < self.max_attempts {
                        tokio::time::sleep(self.retry_backoff).await;
                    }
                }
            }
        }

        Err(FetchError::Exhausted {
            attempts: self.max_attempts,
            last: last_error
                .unwrap_or_else(|| TransportError::Other("no attempts were made".to_string())),
        })
    }
}
