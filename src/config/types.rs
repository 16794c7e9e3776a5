use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub cmx: CmxConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    pub privacy: PrivacyConfig,
}

/// Connection settings for the CMX appliance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmxConfig {
    pub host: String,
    #[serde(default = "default_scheme")]
    pub scheme: String,
    pub username: String,
    pub password: String,
    /// Per-attempt request timeout.
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
    /// Total network calls per fetch, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay between failed attempts.
    #[serde(default = "default_retry_backoff", with = "humantime_serde")]
    pub retry_backoff: Duration,
    #[serde(default = "default_clients_path")]
    pub clients_path: String,
    #[serde(default = "default_aps_path")]
    pub aps_path: String,
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(4)
}

fn default_max_attempts() -> u32 {
    5
}

fn default_retry_backoff() -> Duration {
    Duration::from_secs(3)
}

fn default_clients_path() -> String {
    "/api/location/v1/clients/".to_string()
}

fn default_aps_path() -> String {
    "/api/config/v1/aps/".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Number of future days to plan collection runs for.
    #[serde(default = "default_days")]
    pub days: u32,
    /// Comma-separated daily "H:MM" marks, or the literal "now" for a single
    /// immediate run.
    #[serde(default = "default_times")]
    pub times: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            days: default_days(),
            times: default_times(),
        }
    }
}

fn default_days() -> u32 {
    5
}

fn default_times() -> String {
    "9:00,12:00,15:00,18:00".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivacyConfig {
    /// Secret mixed into every identifier hash. Changing it makes tokens
    /// from earlier runs unlinkable to new ones.
    pub salt: String,
}
