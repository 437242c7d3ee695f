// Shared test helpers

use diskwatch::report::{DiskDataSource, SourceError};

/// Five-line POSIX `df -kP` style survey. /data1 sits exactly at the 80%
/// cutoff, /data2 above it.
pub const SURVEY_FIXED6: &str = "\
Filesystem 1024-blocks Used Available Capacity Mounted on
/dev/sda1 1000 500 500 50% /
/dev/sdb1 2000 1600 400 80% /data1
/dev/sdc1 2000 1620 380 81% /data2
tmpfs 100 0 100 0% /run
";

/// Canned data source: fixture survey text plus per-path size lines. A path
/// with no registered line fails the way a denied `du` call would.
pub struct FixtureSource {
    survey: Option<String>,
    sizes: Vec<(String, String)>,
}

impl FixtureSource {
    pub fn with_survey(text: &str) -> Self {
        Self {
            survey: Some(text.to_string()),
            sizes: Vec::new(),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            survey: None,
            sizes: Vec::new(),
        }
    }

    pub fn size_line(mut self, path: &str, line: &str) -> Self {
        self.sizes.push((path.to_string(), line.to_string()));
        self
    }
}

impl DiskDataSource for FixtureSource {
    fn survey_text(&self) -> Result<String, SourceError> {
        self.survey.clone().ok_or_else(|| SourceError::Spawn {
            command: "df -kP".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        })
    }

    fn directory_size_line(&self, path: &str) -> Result<String, SourceError> {
        self.sizes
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, line)| line.clone())
            .ok_or_else(|| SourceError::Spawn {
                command: format!("du -sh {}", path),
                source: std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "permission denied",
                ),
            })
    }
}
