// Background worker: collect a disk report on a schedule and store it.
// Schedule is a cron expression (local time) or a fixed interval fallback.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::disk_repo::DiskRepo;
use crate::history_repo::HistoryRepo;
use tracing::{info, instrument, warn};

/// Config for the report worker.
#[derive(Debug, Clone)]
pub struct ReportWorkerConfig {
    /// Optional cron expression (e.g. "0 0 0 * * *" = midnight daily). Uses local time.
    pub report_schedule: Option<String>,
    /// Collect every N seconds when report_schedule is not set.
    pub report_interval_secs: u64,
}

/// Spawns the report worker. Returns a join handle.
pub fn spawn(
    disk_repo: Arc<DiskRepo>,
    history_repo: Arc<HistoryRepo>,
    config: ReportWorkerConfig,
    shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        run(disk_repo, history_repo, config, shutdown_rx).await;
    })
}

#[instrument(skip_all, fields(interval_secs = config.report_interval_secs))]
async fn run(
    disk_repo: Arc<DiskRepo>,
    history_repo: Arc<HistoryRepo>,
    config: ReportWorkerConfig,
    mut shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) {
    let (tick_tx, mut tick_rx) = tokio::sync::mpsc::channel::<()>(1);
    tokio::spawn(report_scheduler(config, tick_tx));

    loop {
        tokio::select! {
            tick = tick_rx.recv() => {
                if tick.is_none() {
                    break;
                }
                if let Err(e) = run_one_cycle(&disk_repo, &history_repo).await {
                    warn!(error = %e, "report cycle failed");
                }
            }
            _ = &mut shutdown_rx => {
                tracing::debug!("Report worker shutting down");
                break;
            }
        }
    }
}

/// Sends a message on `tx` at each collection time (cron or fixed interval).
async fn report_scheduler(config: ReportWorkerConfig, tx: tokio::sync::mpsc::Sender<()>) {
    if let Some(ref cron_str) = config.report_schedule {
        let Ok(schedule) = cron::Schedule::from_str(cron_str) else {
            warn!(cron = %cron_str, "invalid report_schedule; scheduled reports will not run");
            return;
        };
        loop {
            let now = chrono::Local::now();
            let next = schedule.after(&now).next();
            if let Some(next) = next {
                let delay = (next - now).to_std().unwrap_or(Duration::from_secs(1));
                tokio::time::sleep(delay).await;
                if tx.send(()).await.is_err() {
                    break;
                }
            } else {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
        }
    } else {
        let interval = Duration::from_secs(config.report_interval_secs);
        loop {
            tokio::time::sleep(interval).await;
            if tx.send(()).await.is_err() {
                break;
            }
        }
    }
}

/// Runs one collection cycle: survey, store the report row, prune old rows.
pub async fn run_one_cycle(
    disk_repo: &DiskRepo,
    history_repo: &HistoryRepo,
) -> anyhow::Result<()> {
    let report = disk_repo.get_disk_report().await?;
    history_repo.save_report(&report).await?;
    let pruned = history_repo.prune_old_data().await?;
    info!(
        hostname = %report.hostname,
        any_over_threshold = report.any_over_threshold,
        partitions = report.partitions.len(),
        pruned_rows = pruned,
        "daily report stored"
    );
    Ok(())
}
