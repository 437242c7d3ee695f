// Survey parser: raw disk-survey text -> normalized partition records.
// Two formats: fixed 6-column POSIX output and header-driven variable
// columns where the mount-point column may contain embedded spaces.

use crate::models::PartitionRecord;
use serde::Deserialize;
use thiserror::Error;

/// Block unit of the survey's size columns. `df -kP` prints 1K blocks.
const BLOCK_BYTES: u64 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SurveyFormat {
    Fixed6,
    HeaderDriven,
}

#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("survey output has no header line")]
    MissingHeader,
    #[error("survey header has {0} columns, need at least 6")]
    ShortHeader(usize),
}

/// Parses raw survey text into ordered partition records, skipping the
/// header line. Any data line that cannot be normalized (wrong token
/// count, non-numeric field) is dropped silently; no partial records.
pub fn parse_survey(
    text: &str,
    format: SurveyFormat,
) -> Result<Vec<PartitionRecord>, SurveyError> {
    let mut lines = text.trim().lines();
    let header = lines.next().ok_or(SurveyError::MissingHeader)?;

    match format {
        SurveyFormat::Fixed6 => Ok(lines.filter_map(parse_fixed6_line).collect()),
        SurveyFormat::HeaderDriven => {
            let fields: Vec<&str> = header.split_whitespace().collect();
            if fields.len() < 6 {
                return Err(SurveyError::ShortHeader(fields.len()));
            }
            Ok(lines
                .filter_map(|line| {
                    let zipped = zip_header_line(&fields, line)?;
                    record_from_columns(&zipped)
                })
                .collect())
        }
    }
}

/// Splits a data line against a header-driven column set. When the line has
/// more tokens than the header, the extras belong to the mount-point column
/// (the last one) and are rejoined with single spaces. The result always has
/// exactly as many entries as the header, or the line is unusable (None).
pub fn zip_header_line(header: &[&str], line: &str) -> Option<Vec<(String, String)>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < header.len() {
        return None;
    }
    let mount_idx = header.len() - 1;
    let mut values: Vec<String> = tokens[..mount_idx].iter().map(|t| (*t).to_string()).collect();
    values.push(tokens[mount_idx..].join(" "));
    Some(
        header
            .iter()
            .map(|h| (*h).to_string())
            .zip(values)
            .collect(),
    )
}

/// A well-formed fixed6 line splits into exactly 6 whitespace tokens:
/// filesystem, total(KB), used(KB), available(KB), "<int>%", mount point.
fn parse_fixed6_line(line: &str) -> Option<PartitionRecord> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 6 {
        return None;
    }
    build_record(tokens[0], tokens[1], tokens[2], tokens[3], tokens[4], tokens[5])
}

/// Positional extraction from a zipped header-driven row: filesystem first,
/// three numeric KB columns, the tool's percentage, mount point last.
fn record_from_columns(columns: &[(String, String)]) -> Option<PartitionRecord> {
    let last = columns.len() - 1;
    build_record(
        &columns[0].1,
        &columns[1].1,
        &columns[2].1,
        &columns[3].1,
        &columns[4].1,
        &columns[last].1,
    )
}

fn build_record(
    filesystem: &str,
    total_kb: &str,
    used_kb: &str,
    available_kb: &str,
    percent: &str,
    mount_point: &str,
) -> Option<PartitionRecord> {
    let total_kb: u64 = total_kb.parse().ok()?;
    let used_kb: u64 = used_kb.parse().ok()?;
    let available_kb: u64 = available_kb.parse().ok()?;
    let used_percent: u8 = percent.trim_end_matches('%').parse().ok()?;
    Some(PartitionRecord {
        mount_point: mount_point.to_string(),
        filesystem: filesystem.to_string(),
        total_bytes: total_kb * BLOCK_BYTES,
        used_bytes: used_kb * BLOCK_BYTES,
        available_bytes: available_kb * BLOCK_BYTES,
        used_percent,
    })
}
