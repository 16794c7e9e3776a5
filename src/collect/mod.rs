pub mod ap;
pub mod client;

use crate::config::types::Config;
use crate::fetch::{FetchClient, FetchError, Transport};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// The status code that carries a decodable payload. Any other received
/// status still counts as a fetch success, but yields a header-only snapshot.
pub const SUCCESS_STATUS: u16 = 200;

/// Map placement shared by both telemetry kinds.
#[derive(Debug, Deserialize)]
pub struct MapCoordinate {
    pub x: f64,
    pub y: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryKind {
    Clients,
    AccessPoints,
}

impl TelemetryKind {
    pub fn label(&self) -> &'static str {
        match self {
            TelemetryKind::Clients => "clients",
            TelemetryKind::AccessPoints => "access_points",
        }
    }

    /// Output file prefix for this kind's snapshots.
    pub fn file_prefix(&self) -> &'static str {
        match self {
            TelemetryKind::Clients => "user_data",
            TelemetryKind::AccessPoints => "ap_data",
        }
    }

    pub fn header(&self) -> &'static [&'static str] {
        match self {
            TelemetryKind::Clients => &client::CLIENT_HEADER,
            TelemetryKind::AccessPoints => &ap::AP_HEADER,
        }
    }
}

/// One collection cycle's output for one telemetry kind: a fixed header row
/// followed by zero or more transformed records. Handed to the writer as a
/// unit and discarded afterwards.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn new(kind: TelemetryKind) -> Self {
        Self {
            header: kind.header().iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }
}

/// Result of one collection job: the dataset plus how many malformed records
/// were dropped while decoding the batch.
#[derive(Debug)]
pub struct JobReport {
    pub dataset: Dataset,
    pub skipped: usize,
}

/// Failure of a whole record batch. Per-record problems never surface here;
/// they are skipped and counted in the report instead.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("response body is not a JSON array: {0}")]
    Body(#[from] serde_json::Error),
}

/// A single malformed record inside an otherwise good batch.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record failed to decode: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("record has an empty identifier")]
    EmptyIdentifier,

    #[error("record reports {0} radio interfaces, expected 1 or 2")]
    InterfaceCount(usize),
}

/// Orchestrates one fetch-transform cycle for a telemetry kind.
pub struct CollectionJob {
    fetch: FetchClient,
    base_url: String,
    clients_path: String,
    aps_path: String,
    salt: String,
}

impl CollectionJob {
    pub fn new(config: &Config, transport: Arc<dyn Transport>) -> Self {
        let fetch = FetchClient::new(
            transport,
            config.cmx.max_attempts,
            config.cmx.retry_backoff,
        );

        Self {
            fetch,
            base_url: format!("{}://{}", config.cmx.scheme, config.cmx.host),
            clients_path: config.cmx.clients_path.clone(),
            aps_path: config.cmx.aps_path.clone(),
            salt: config.privacy.salt.clone(),
        }
    }

    pub fn endpoint_url(&self, kind: TelemetryKind) -> String {
        let path = match kind {
            TelemetryKind::Clients => &self.clients_path,
            TelemetryKind::AccessPoints => &self.aps_path,
        };
        format!("{}{}", self.base_url, path)
    }

    /// Fetches and transforms one batch. Transport exhaustion abandons this
    /// kind for this cycle only; a received non-200 response produces a
    /// header-only dataset; malformed records inside a 200 batch are skipped
    /// and counted, never aborting the rest of the batch.
    pub async fn run(&self, kind: TelemetryKind) -> Result<JobReport, JobError> {
        let url = self.endpoint_url(kind);
        info!(kind = kind.label(), url = %url, "Collecting telemetry");

        let response = self.fetch.fetch(&url).await?;

        let mut dataset = Dataset::new(kind);
        if response.status != SUCCESS_STATUS {
            warn!(
                kind = kind.label(),
                status = response.status,
                "Unexpected status code, snapshot will contain the header only"
            );
            return Ok(JobReport { dataset, skipped: 0 });
        }

        let entries: Vec<serde_json::Value> = serde_json::from_str(&response.body)?;
        let mut skipped = 0usize;
        for entry in entries {
            let decoded = match kind {
                TelemetryKind::Clients => client::decode_row(entry, &self.salt),
                TelemetryKind::AccessPoints => ap::decode_row(entry),
            };
            match decoded {
                Ok(row) => dataset.rows.push(row),
                Err(e) => {
                    debug!(kind = kind.label(), error = %e, "Skipping malformed record");
                    skipped += 1;
                }
            }
        }

        info!(
            kind = kind.label(),
            records = dataset.rows.len(),
            skipped,
            "Batch decoded"
        );
        Ok(JobReport { dataset, skipped })
    }
}
