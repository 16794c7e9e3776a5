use crate::collect::CollectionJob;
use crate::config::load_config;
use crate::fetch::{HttpTransport, TransportError};
use crate::output::CsvWriter;
use crate::schedule::runner::Scheduler;
use crate::schedule::{Schedule, ScheduleParseError};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("schedule error: {0}")]
    Schedule(#[from] ScheduleParseError),

    #[error("transport setup error: {0}")]
    Transport(#[from] TransportError),
}

pub async fn run(config_path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = match config_path {
        Some(path) => path,
        None => {
            eprintln!("Error: config not found");
            eprintln!("Searched locations:");
            eprintln!("  ~/.config/cmx-anonymiser/config.yml");
            eprintln!("  /etc/cmx-anonymiser/config.yml");
            eprintln!("\nUse --config <path> to specify a config file, or run 'cmx-anonymiser config init' to generate one.");
            std::process::exit(1);
        }
    };

    run_scheduler(&config_path).await.map_err(|e| e.into())
}

async fn run_scheduler(config_path: &PathBuf) -> Result<(), RunError> {
    info!(config_path = %config_path.display(), "Loading configuration");
    let config = load_config(config_path)?;

    // Already validated during load; parsed here to get the typed value.
    let schedule = Schedule::parse(config.schedule.days, &config.schedule.times)?;

    info!(
        host = %config.cmx.host,
        username = %config.cmx.username,
        days = config.schedule.days,
        times = %config.schedule.times,
        "Starting collection scheduler"
    );

    let transport = Arc::new(HttpTransport::new(
        &config.cmx.username,
        &config.cmx.password,
        config.cmx.timeout,
    )?);
    let job = CollectionJob::new(&config, transport);
    let writer = CsvWriter::new(config.output.directory.clone());

    Scheduler::new(job, writer, schedule).run().await;

    info!("Scheduler finished");
    Ok(())
}
