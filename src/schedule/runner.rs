use super::plan::build_plan;
use super::Schedule;
use crate::collect::{CollectionJob, TelemetryKind};
use crate::output::CsvWriter;
use chrono::Local;
use std::time::Duration;
use tracing::{error, info, warn};

/// Drives the process: either one immediate collection cycle, or the full
/// run plan. Owns the plan for the process lifetime; cycles run to
/// completion one at a time, so they never overlap.
pub struct Scheduler {
    job: CollectionJob,
    writer: CsvWriter,
    schedule: Schedule,
}

impl Scheduler {
    pub fn new(job: CollectionJob, writer: CsvWriter, schedule: Schedule) -> Self {
        Self {
            job,
            writer,
            schedule,
        }
    }

    pub async fn run(self) {
        match &self.schedule {
            Schedule::Now => {
                info!("Schedule is 'now', running a single collection cycle");
                self.run_cycle().await;
            }
            Schedule::Daily { days, marks } => {
                let now = Local::now();
                let mut plan = build_plan(*days, marks, now);
                if plan.is_empty() {
                    warn!("Run plan is empty, nothing to schedule");
                    return;
                }

                // The timer queue drains earliest-first. The sort is stable,
                // so same-instant candidates keep their configured order.
                plan.sort();
                info!(timers = plan.len(), days = *days, "Armed collection timers");

                for instant in plan {
                    let delay = (instant - Local::now()).to_std().unwrap_or(Duration::ZERO);
                    info!(
                        at = %instant.format("%Y-%m-%d %H:%M:%S"),
                        in_secs = delay.as_secs(),
                        "Next collection scheduled"
                    );
                    tokio::time::sleep(delay).await;
                    self.run_cycle().await;
                }

                info!("Finished scheduled runs");
            }
        }
    }

    /// One full collection cycle: both telemetry kinds, each fetched,
    /// transformed and persisted independently. A failure in one kind never
    /// affects the other kind or later cycles.
    async fn run_cycle(&self) {
        info!("Collection cycle started");

        for kind in [TelemetryKind::AccessPoints, TelemetryKind::Clients] {
            match self.job.run(kind).await {
                Ok(report) => {
                    if report.skipped > 0 {
                        warn!(
                            kind = kind.label(),
                            skipped = report.skipped,
                            "Dropped malformed records from batch"
                        );
                    }
                    match self.writer.persist(&report.dataset, kind) {
                        Ok(path) => {
                            info!(
                                kind = kind.label(),
                                records = report.dataset.rows.len(),
                                path = %path.display(),
                                "Snapshot written"
                            );
                        }
                        Err(e) => {
                            // Persistence is not retried; the next cycle gets
                            // a fresh file name anyway.
                            error!(kind = kind.label(), error = %e, "Failed to write snapshot");
                        }
                    }
                }
                Err(e) => {
                    error!(kind = kind.label(), error = %e, "Collection failed, nothing to write");
                }
            }
        }

        info!("Collection cycle finished");
    }
}
