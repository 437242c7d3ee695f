// HistoryRepo tests: connect, init, save, read back, prune

use diskwatch::history_repo::HistoryRepo;
use diskwatch::models::{
    ClassifiedPartition, DirectorySize, DiskReport, PartitionRecord,
};
use tempfile::TempDir;

fn sample_report(hostname: &str, any_over: bool) -> DiskReport {
    let record = PartitionRecord {
        mount_point: "/data1".into(),
        filesystem: "/dev/sdb1".into(),
        total_bytes: 2000 * 1024,
        used_bytes: 1620 * 1024,
        available_bytes: 380 * 1024,
        used_percent: 81,
    };
    DiskReport {
        hostname: hostname.into(),
        partitions: vec![ClassifiedPartition {
            qualifier: Some("data".into()),
            total_mb: 2.0,
            used_mb: 2.0,
            usage_percent: 81.0,
            over_threshold: any_over,
            record,
        }],
        over_threshold_mounts: if any_over { vec!["/data1".into()] } else { vec![] },
        any_over_threshold: any_over,
        directory_sizes: vec![DirectorySize {
            name: "logs".into(),
            path: "/var/log".into(),
            qualifier: None,
            size_bytes: 482 * 1024 * 1024,
        }],
    }
}

#[tokio::test]
async fn history_repo_connect_and_init() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reports.db");
    let repo = HistoryRepo::connect(path.to_str().unwrap(), 14)
        .await
        .expect("connect");
    repo.init().await.expect("init");
    let rows = repo.get_recent_reports(10).await.expect("query");
    assert!(rows.is_empty());
}

#[tokio::test]
async fn history_repo_saves_and_reads_back_report_row() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reports.db");
    let repo = HistoryRepo::connect(path.to_str().unwrap(), 14)
        .await
        .expect("connect");
    repo.init().await.expect("init");

    repo.save_report(&sample_report("host1", true))
        .await
        .expect("save");

    let rows = repo.get_recent_reports(10).await.expect("query");
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.hostname, "host1");
    assert_eq!(row.report_type, "SYSTEM");
    assert_eq!(row.report_key, "filesystem-capacity");
    assert_eq!(row.value, "true");
    assert_eq!(row.service, "");
    assert_eq!(row.current_ymd.len(), 10); // YYYY-MM-DD
    assert!(row.created_at > 0);

    // The JSON column holds the exact wire shape.
    let back: DiskReport = serde_json::from_str(&row.json).expect("json");
    assert_eq!(back.hostname, "host1");
    assert_eq!(back.over_threshold_mounts, vec!["/data1"]);
}

#[tokio::test]
async fn history_repo_returns_rows_in_insert_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reports.db");
    let repo = HistoryRepo::connect(path.to_str().unwrap(), 14)
        .await
        .expect("connect");
    repo.init().await.expect("init");

    repo.save_report(&sample_report("first", false)).await.unwrap();
    repo.save_report(&sample_report("second", true)).await.unwrap();

    let rows = repo.get_recent_reports(10).await.expect("query");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].hostname, "first");
    assert_eq!(rows[1].hostname, "second");
    assert_eq!(rows[0].value, "false");
}

#[tokio::test]
async fn history_repo_prune_keeps_fresh_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reports.db");
    let repo = HistoryRepo::connect(path.to_str().unwrap(), 1)
        .await
        .expect("connect");
    repo.init().await.expect("init");

    repo.save_report(&sample_report("host1", false)).await.unwrap();
    let pruned = repo.prune_old_data().await.expect("prune");
    assert_eq!(pruned, 0);
    assert_eq!(repo.get_recent_reports(10).await.unwrap().len(), 1);
}
