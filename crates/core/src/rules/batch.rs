use serde::Serialize;

use crate::domain::customer::CustomerRecord;
use crate::domain::profile::CustomerProfile;
use crate::rules::ProfileGenerator;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchEntry {
    Ok { line: usize, profile: CustomerProfile },
    Error { line: usize, message: String },
}

impl BatchEntry {
    pub fn line(&self) -> usize {
        match self {
            Self::Ok { line, .. } | Self::Error { line, .. } => *line,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
    pub generated: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Profiles JSON Lines input. Blank lines are skipped; line numbers are 1-based.
pub fn generate_batch<'a, I>(lines: I) -> BatchReport
where
    I: IntoIterator<Item = &'a str>,
{
    let generator = ProfileGenerator::new();
    let mut report = BatchReport::default();

    for (index, raw) in lines.into_iter().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }

        let line = index + 1;
        match CustomerRecord::from_json_str(raw) {
            Ok(record) => {
                report.generated += 1;
                report.entries.push(BatchEntry::Ok { line, profile: generator.generate(&record) });
            }
            Err(error) => {
                tracing::warn!(
                    event_name = "profile.batch.line_rejected",
                    line,
                    error = %error,
                    "skipping undecodable batch line"
                );
                report.failed += 1;
                report.entries.push(BatchEntry::Error { line, message: error.to_string() });
            }
        }
    }

    report
}
