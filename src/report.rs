// Report engine: survey -> classified partitions, group sums, threshold
// verdict, directory sizes. Synchronous and request-local; configuration is
// compiled once and read-only afterward.

use crate::config::{AppConfig, LogicalGroup, NamedDirectory};
use crate::models::{
    ClassifiedPartition, DirectorySize, DiskReport, GroupUsage, PartitionRecord,
};
use crate::patterns::PatternSet;
use crate::survey::{self, SurveyError, SurveyFormat};
use crate::units;
use std::collections::HashMap;
use thiserror::Error;

/// Failure of one external data-source call (survey or directory size).
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{command} exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("{command} produced non-UTF-8 output")]
    InvalidOutput { command: String },
}

/// A whole collection cycle fails only when the survey source itself does.
/// The two variants let the caller distinguish "retry later" from "the
/// survey tool printed something we cannot read".
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("survey source unavailable: {0}")]
    SurveyUnavailable(#[from] SourceError),
    #[error("malformed survey output: {0}")]
    MalformedSurvey(#[from] SurveyError),
}

/// Narrow capability interface over the host: fetch raw survey text, fetch
/// one directory's size line. Keeps the engine independent of how the data
/// is obtained (command-line tool, filesystem API, fixtures in tests).
pub trait DiskDataSource: Send + Sync {
    fn survey_text(&self) -> Result<String, SourceError>;

    /// One `"<size-token>\t<path>"` line for the given directory.
    fn directory_size_line(&self, path: &str) -> Result<String, SourceError>;
}

/// Immutable engine state built from configuration at startup. Safe to share
/// across concurrent collection requests.
pub struct ReportEngine {
    format: SurveyFormat,
    threshold_percent: u8,
    filesystem_prefix: Option<String>,
    patterns: PatternSet,
    groups: Vec<LogicalGroup>,
    directories: Vec<NamedDirectory>,
}

impl ReportEngine {
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        Ok(Self {
            format: config.report.format,
            threshold_percent: config.report.threshold_percent,
            filesystem_prefix: config.report.filesystem_prefix.clone(),
            patterns: PatternSet::compile(&config.patterns)?,
            groups: config.groups.clone(),
            directories: config.directories.clone(),
        })
    }

    /// Builds the full report for one collection cycle: classify every
    /// surveyed partition, flag those strictly above the threshold, then
    /// size the configured directories (each one independently fallible).
    pub fn build_report(
        &self,
        hostname: &str,
        source: &dyn DiskDataSource,
    ) -> Result<DiskReport, ReportError> {
        let records = self.collect_records(source)?;

        let mut partitions = Vec::with_capacity(records.len());
        let mut over_threshold_mounts = Vec::new();
        for record in records {
            if let Some(prefix) = &self.filesystem_prefix
                && !record.filesystem.starts_with(prefix.as_str())
            {
                continue;
            }
            let over_threshold = record.used_percent > self.threshold_percent;
            if over_threshold {
                over_threshold_mounts.push(record.mount_point.clone());
            }
            let usage_percent = if record.total_bytes > 0 {
                units::truncate(
                    record.used_bytes as f64 * 100.0 / record.total_bytes as f64,
                    2,
                )
            } else {
                0.0
            };
            partitions.push(ClassifiedPartition {
                qualifier: self
                    .patterns
                    .classify(&record.mount_point)
                    .map(str::to_string),
                total_mb: units::bytes_to_megabytes(record.total_bytes).round(),
                used_mb: units::bytes_to_megabytes(record.used_bytes).round(),
                usage_percent,
                over_threshold,
                record,
            });
        }

        let directory_sizes = self.size_directories(source);
        let any_over_threshold = !over_threshold_mounts.is_empty();

        Ok(DiskReport {
            hostname: hostname.to_string(),
            partitions,
            over_threshold_mounts,
            any_over_threshold,
            directory_sizes,
        })
    }

    /// Runs a fresh survey and sums usage per configured logical group.
    pub fn collect_group_usage(
        &self,
        source: &dyn DiskDataSource,
    ) -> Result<Vec<GroupUsage>, ReportError> {
        let records = self.collect_records(source)?;
        Ok(self.group_usage(&records))
    }

    /// Per-group sums over the member paths present in `records`. An absent
    /// member contributes zero; that is documented behavior, not an error.
    pub fn group_usage(&self, records: &[PartitionRecord]) -> Vec<GroupUsage> {
        let index = index_by_mount(records);
        self.groups
            .iter()
            .map(|group| {
                let mut used_bytes = 0u64;
                let mut available_bytes = 0u64;
                for path in &group.paths {
                    match index.get(path.as_str()) {
                        Some(record) => {
                            used_bytes += record.used_bytes;
                            available_bytes += record.available_bytes;
                        }
                        None => {
                            tracing::debug!(
                                group = %group.name,
                                path = %path,
                                "group member absent from survey"
                            );
                        }
                    }
                }
                GroupUsage {
                    group_name: group.name.clone(),
                    used_bytes,
                    available_bytes,
                }
            })
            .collect()
    }

    fn collect_records(
        &self,
        source: &dyn DiskDataSource,
    ) -> Result<Vec<PartitionRecord>, ReportError> {
        let text = source.survey_text()?;
        Ok(survey::parse_survey(&text, self.format)?)
    }

    fn size_directories(&self, source: &dyn DiskDataSource) -> Vec<DirectorySize> {
        let mut sizes = Vec::with_capacity(self.directories.len());
        for dir in &self.directories {
            let line = match source.directory_size_line(&dir.path) {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!(directory = %dir.path, error = %e, "directory size query failed");
                    continue;
                }
            };
            let Some(size_bytes) = parse_directory_size_line(&line) else {
                tracing::warn!(directory = %dir.path, line = %line.trim(), "unparsable directory size");
                continue;
            };
            sizes.push(DirectorySize {
                name: dir.name.clone(),
                path: dir.path.clone(),
                qualifier: self.patterns.classify(&dir.path).map(str::to_string),
                size_bytes,
            });
        }
        sizes
    }
}

/// Survey records keyed by mount point. Duplicate mount points replace the
/// earlier entry (last write wins), mirroring a replace-on-insert mapping.
pub fn index_by_mount(records: &[PartitionRecord]) -> HashMap<&str, &PartitionRecord> {
    let mut index = HashMap::with_capacity(records.len());
    for record in records {
        index.insert(record.mount_point.as_str(), record);
    }
    index
}

/// Extracts the byte count from a `"<size-token>\t<path>"` query line.
pub fn parse_directory_size_line(line: &str) -> Option<u64> {
    let (token, _path) = line.trim().split_once('\t')?;
    units::parse_size_token(token)
}
