// Report worker tests: one collection cycle end to end

mod common;

use common::{FixtureSource, SURVEY_FIXED6};
use diskwatch::config::AppConfig;
use diskwatch::disk_repo::DiskRepo;
use diskwatch::history_repo::HistoryRepo;
use diskwatch::report::ReportEngine;
use diskwatch::report_worker;
use std::sync::Arc;
use tempfile::TempDir;

const WORKER_CONFIG: &str = r#"
[server]
port = 5000
host = "0.0.0.0"

[report]
threshold_percent = 80

[database]
path = "data/test.db"

[[groups]]
name = "kudu"
paths = ["/data1", "/data2"]
"#;

fn disk_repo(source: FixtureSource) -> Arc<DiskRepo> {
    let config = AppConfig::load_from_str(WORKER_CONFIG).expect("config");
    let engine = Arc::new(ReportEngine::from_config(&config).expect("engine"));
    Arc::new(DiskRepo::new(engine, Arc::new(source)))
}

#[tokio::test]
async fn run_one_cycle_stores_a_report_row() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reports.db");
    let history_repo = Arc::new(
        HistoryRepo::connect(path.to_str().unwrap(), 14)
            .await
            .expect("connect"),
    );
    history_repo.init().await.expect("init");

    let disk_repo = disk_repo(FixtureSource::with_survey(SURVEY_FIXED6));
    report_worker::run_one_cycle(&disk_repo, &history_repo)
        .await
        .expect("cycle");

    let rows = history_repo.get_recent_reports(10).await.expect("query");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].value, "true"); // /data2 is at 81%
    assert_eq!(rows[0].hostname, disk_repo.hostname());
}

#[tokio::test]
async fn run_one_cycle_fails_when_survey_unavailable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reports.db");
    let history_repo = Arc::new(
        HistoryRepo::connect(path.to_str().unwrap(), 14)
            .await
            .expect("connect"),
    );
    history_repo.init().await.expect("init");

    let disk_repo = disk_repo(FixtureSource::unavailable());
    let err = report_worker::run_one_cycle(&disk_repo, &history_repo).await;
    assert!(err.is_err());
    assert!(
        history_repo
            .get_recent_reports(10)
            .await
            .unwrap()
            .is_empty()
    );
}
