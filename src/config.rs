use crate::patterns::NamedPattern;
use crate::survey::SurveyFormat;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub report: ReportConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub patterns: Vec<NamedPattern>,
    #[serde(default)]
    pub groups: Vec<LogicalGroup>,
    #[serde(default)]
    pub directories: Vec<NamedDirectory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// When set, /api routes require this value in the X-Access-Token header.
    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_format")]
    pub format: SurveyFormat,
    /// Partitions strictly above this used-percentage are flagged.
    #[serde(default = "default_threshold_percent")]
    pub threshold_percent: u8,
    /// When set, only partitions whose filesystem starts with this prefix
    /// (e.g. "/dev") appear in the report.
    #[serde(default)]
    pub filesystem_prefix: Option<String>,
    #[serde(default = "default_survey_command")]
    pub survey_command: Vec<String>,
    #[serde(default = "default_directory_size_command")]
    pub directory_size_command: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
    /// Optional cron expression for the daily report job (e.g.
    /// "0 0 0 * * *" = midnight daily). Uses local time.
    #[serde(default)]
    pub report_schedule: Option<String>,
    /// Collect a report every N seconds when report_schedule is not set.
    #[serde(default = "default_report_interval_secs")]
    pub report_interval_secs: u64,
}

/// A named set of mount points whose usage is summed together.
#[derive(Debug, Clone, Deserialize)]
pub struct LogicalGroup {
    pub name: String,
    pub paths: Vec<String>,
}

/// A named directory whose recursive size goes into the report.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedDirectory {
    pub name: String,
    pub path: String,
}

fn default_format() -> SurveyFormat {
    SurveyFormat::Fixed6
}

fn default_threshold_percent() -> u8 {
    80
}

fn default_survey_command() -> Vec<String> {
    vec!["df".into(), "-kP".into()]
}

fn default_directory_size_command() -> Vec<String> {
    vec!["du".into(), "-sh".into()]
}

fn default_retention_days() -> u32 {
    14
}

fn default_report_interval_secs() -> u64 {
    86_400
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            self.report.threshold_percent <= 100,
            "report.threshold_percent must be at most 100, got {}",
            self.report.threshold_percent
        );
        anyhow::ensure!(
            !self.report.survey_command.is_empty(),
            "report.survey_command must name a program"
        );
        anyhow::ensure!(
            !self.report.directory_size_command.is_empty(),
            "report.directory_size_command must name a program"
        );
        anyhow::ensure!(
            !self.database.path.is_empty(),
            "database.path must be non-empty"
        );
        anyhow::ensure!(
            self.database.retention_days > 0,
            "database.retention_days must be > 0, got {}",
            self.database.retention_days
        );
        anyhow::ensure!(
            self.database.report_interval_secs > 0,
            "database.report_interval_secs must be > 0, got {}",
            self.database.report_interval_secs
        );
        for p in &self.patterns {
            anyhow::ensure!(!p.name.is_empty(), "patterns entries need a non-empty name");
        }
        for g in &self.groups {
            anyhow::ensure!(!g.name.is_empty(), "groups entries need a non-empty name");
        }
        for d in &self.directories {
            anyhow::ensure!(!d.name.is_empty(), "directories entries need a non-empty name");
            anyhow::ensure!(
                !d.path.is_empty(),
                "directory '{}' needs a non-empty path",
                d.name
            );
        }
        Ok(())
    }
}
