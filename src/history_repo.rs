// SQLite daily-report history (ported from the Postgres daily_report table).
// One row per collection cycle; the full DiskReport rides along as JSON so
// downstream consumers see the exact wire shape.

use crate::models::DiskReport;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tracing::instrument;

pub struct HistoryRepo {
    pool: SqlitePool,
    retention_ms: i64,
}

/// One persisted collection cycle, as read back from the store.
#[derive(Debug, Clone)]
pub struct DailyReportRow {
    pub created_at: i64,
    pub current_ymd: String,
    pub report_type: String,
    pub report_key: String,
    pub value: String,
    pub hostname: String,
    pub service: String,
    pub json: String,
}

impl HistoryRepo {
    pub async fn connect(path: &str, retention_days: u32) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new().connect_with(opts).await?;
        let retention_ms = (retention_days as i64) * 24 * 60 * 60 * 1000;
        Ok(Self { pool, retention_ms })
    }

    pub async fn init(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS daily_report (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                created_at INTEGER NOT NULL,
                current_ymd TEXT NOT NULL,
                report_type TEXT NOT NULL,
                report_key TEXT NOT NULL,
                value TEXT NOT NULL,
                hostname TEXT NOT NULL,
                service TEXT NOT NULL,
                json TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_daily_report_created_at ON daily_report(created_at)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[instrument(skip(self, report), fields(repo = "history", operation = "save_report", hostname = %report.hostname))]
    pub async fn save_report(&self, report: &DiskReport) -> anyhow::Result<()> {
        let now = chrono::Local::now();
        let created_at = now.timestamp_millis();
        let current_ymd = now.format("%Y-%m-%d").to_string();
        let json = serde_json::to_string(report)?;

        sqlx::query(
            "INSERT INTO daily_report (created_at, current_ymd, report_type, report_key, value, hostname, service, json)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(created_at)
        .bind(&current_ymd)
        .bind("SYSTEM")
        .bind("filesystem-capacity")
        .bind(report.any_over_threshold.to_string())
        .bind(&report.hostname)
        .bind("")
        .bind(&json)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_recent_reports(&self, limit: u32) -> anyhow::Result<Vec<DailyReportRow>> {
        let rows = sqlx::query(
            "SELECT created_at, current_ymd, report_type, report_key, value, hostname, service, json
             FROM daily_report ORDER BY id DESC LIMIT $1",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(DailyReportRow {
                created_at: row.try_get("created_at")?,
                current_ymd: row.try_get("current_ymd")?,
                report_type: row.try_get("report_type")?,
                report_key: row.try_get("report_key")?,
                value: row.try_get("value")?,
                hostname: row.try_get("hostname")?,
                service: row.try_get("service")?,
                json: row.try_get("json")?,
            });
        }
        out.reverse();
        Ok(out)
    }

    #[instrument(skip(self), fields(repo = "history", operation = "prune_old_data"))]
    pub async fn prune_old_data(&self) -> anyhow::Result<u64> {
        let cutoff = chrono::Local::now().timestamp_millis() - self.retention_ms;
        let r = sqlx::query("DELETE FROM daily_report WHERE created_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;
        Ok(r.rows_affected())
    }
}
