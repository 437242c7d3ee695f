// Disk survey and directory sizing via external commands

use crate::models::{DiskReport, GroupUsage};
use crate::report::{DiskDataSource, ReportEngine, SourceError};
use std::process::Command;
use std::sync::Arc;
use sysinfo::System;
use tracing::instrument;

/// Command-backed data source: runs the configured survey and
/// directory-size programs (`df -kP` and `du -sh` by default).
pub struct CommandDiskSource {
    survey_command: Vec<String>,
    directory_size_command: Vec<String>,
}

impl CommandDiskSource {
    pub fn new(survey_command: Vec<String>, directory_size_command: Vec<String>) -> Self {
        Self {
            survey_command,
            directory_size_command,
        }
    }

    fn run(command: &[String], extra_arg: Option<&str>) -> Result<String, SourceError> {
        let rendered = match extra_arg {
            Some(arg) => format!("{} {}", command.join(" "), arg),
            None => command.join(" "),
        };
        let mut cmd = Command::new(&command[0]);
        cmd.args(&command[1..]);
        if let Some(arg) = extra_arg {
            cmd.arg(arg);
        }
        let output = cmd.output().map_err(|source| SourceError::Spawn {
            command: rendered.clone(),
            source,
        })?;
        if !output.status.success() {
            return Err(SourceError::Failed {
                command: rendered,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        String::from_utf8(output.stdout)
            .map_err(|_| SourceError::InvalidOutput { command: rendered })
    }
}

impl DiskDataSource for CommandDiskSource {
    fn survey_text(&self) -> Result<String, SourceError> {
        Self::run(&self.survey_command, None)
    }

    fn directory_size_line(&self, path: &str) -> Result<String, SourceError> {
        Self::run(&self.directory_size_command, Some(path))
    }
}

/// Async wrapper around the synchronous engine + data source. External calls
/// may block, so collection runs on the blocking pool.
pub struct DiskRepo {
    engine: Arc<ReportEngine>,
    source: Arc<dyn DiskDataSource>,
    hostname: String,
}

impl DiskRepo {
    pub fn new(engine: Arc<ReportEngine>, source: Arc<dyn DiskDataSource>) -> Self {
        let hostname = System::host_name().unwrap_or_else(|| "unknown".into());
        Self {
            engine,
            source,
            hostname,
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    #[instrument(skip(self), fields(repo = "disk", operation = "get_disk_report"))]
    pub async fn get_disk_report(&self) -> anyhow::Result<DiskReport> {
        let engine = self.engine.clone();
        let source = self.source.clone();
        let hostname = self.hostname.clone();
        let report = tokio::task::spawn_blocking(move || {
            engine.build_report(&hostname, source.as_ref())
        })
        .await
        .map_err(|e| anyhow::anyhow!("disk report task join: {}", e))??;
        Ok(report)
    }

    #[instrument(skip(self), fields(repo = "disk", operation = "get_group_usage"))]
    pub async fn get_group_usage(&self) -> anyhow::Result<Vec<GroupUsage>> {
        let engine = self.engine.clone();
        let source = self.source.clone();
        let groups = tokio::task::spawn_blocking(move || {
            engine.collect_group_usage(source.as_ref())
        })
        .await
        .map_err(|e| anyhow::anyhow!("group usage task join: {}", e))??;
        Ok(groups)
    }
}
