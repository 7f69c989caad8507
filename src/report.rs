//! Best-effort problem reports
//!
//! Players can flag a card they think is broken. Each report is logged and
//! appended to a plain text file as `<RFC 3339 timestamp>\t<word>`. Writing
//! the file is best effort: a failure is logged and never reaches the caller.

use chrono::{SecondsFormat, Utc};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// What happened to a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Appended to the report file
    Recorded,
    /// The file write failed; the report only reached the operational log
    LoggedOnly,
}

impl ReportOutcome {
    /// Message shown to the player
    pub fn message(self) -> &'static str {
        match self {
            ReportOutcome::Recorded => "Problem reported successfully",
            ReportOutcome::LoggedOnly => "Problem noted",
        }
    }
}

/// Appends reports to a log file
#[derive(Debug, Clone)]
pub struct ProblemReporter {
    log_path: PathBuf,
}

impl ProblemReporter {
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        ProblemReporter {
            log_path: log_path.into(),
        }
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Report a problem with a card's word
    ///
    /// Never fails; the outcome tells whether the report hit the file.
    pub async fn report(&self, word: &str) -> ReportOutcome {
        let word = single_line(word);
        log::info!("Problem reported for word '{word}'");

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let line = format!("{timestamp}\t{word}\n");

        match self.append(&line).await {
            Ok(()) => ReportOutcome::Recorded,
            Err(e) => {
                log::warn!(
                    "Could not write problem report to {}: {e}",
                    self.log_path.display()
                );
                ReportOutcome::LoggedOnly
            }
        }
    }

    async fn append(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.log_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await
    }
}

/// Tabs and line breaks become spaces so each report stays on one line
fn single_line(word: &str) -> String {
    word.chars()
        .map(|c| match c {
            '\t' | '\n' | '\r' => ' ',
            _ => c,
        })
        .collect()
}
