// Domain models (ported from the Python reporter's JSON shapes)

use serde::{Deserialize, Serialize};

/// One normalized line of disk-survey output. Ephemeral: produced fresh on
/// every survey, keyed by mount point for classification and grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionRecord {
    pub mount_point: String,
    pub filesystem: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub available_bytes: u64,
    /// The survey tool's own rounded percentage, as printed.
    pub used_percent: u8,
}

/// A partition as it appears in the report: the raw record plus the pattern
/// qualifier and derived megabyte / truncated-percentage fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedPartition {
    pub qualifier: Option<String>,
    #[serde(flatten)]
    pub record: PartitionRecord,
    pub total_mb: f64,
    pub used_mb: f64,
    /// used_bytes * 100 / total_bytes, truncated to 2 decimals. Kept
    /// alongside the tool-reported `usedPercent`.
    pub usage_percent: f64,
    pub over_threshold: bool,
}

/// Summed usage across the mount points of one logical storage group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupUsage {
    pub group_name: String,
    pub used_bytes: u64,
    pub available_bytes: u64,
}

/// Recursive size of one configured directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorySize {
    pub name: String,
    pub path: String,
    pub qualifier: Option<String>,
    pub size_bytes: u64,
}

/// Complete output of one collection cycle. Constructed fresh each time,
/// immutable once returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskReport {
    pub hostname: String,
    pub partitions: Vec<ClassifiedPartition>,
    pub over_threshold_mounts: Vec<String>,
    pub any_over_threshold: bool,
    pub directory_sizes: Vec<DirectorySize>,
}
