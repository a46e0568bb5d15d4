//! Batch report for a link cleaning run
//! Author: kartik4091
//! Created: 2025-06-05

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::cleaner::InspectionState;
use crate::error::{Error, Result};

/// Final status of one input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Links were removed and the cleaned copy written
    Cleaned,
    /// No pattern removed anything; nothing written
    Unchanged,
    /// Dry run: links found and removed in memory, nothing written
    Inspected,
    /// The document could not be opened or written
    Failed,
}

/// Outcome of processing one input file
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub status: FileStatus,
    pub state: InspectionState,
    /// Pattern that removed something, if any
    pub pattern: Option<String>,
    pub keys_removed: usize,
    pub annotations_removed: usize,
    pub replaced: bool,
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn failed(input: &Path, error: &Error) -> Self {
        Self {
            input: input.to_path_buf(),
            output: None,
            status: FileStatus::Failed,
            state: InspectionState::Unedited,
            pattern: None,
            keys_removed: 0,
            annotations_removed: 0,
            replaced: false,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub files: usize,
    pub cleaned: usize,
    pub unchanged: usize,
    pub inspected: usize,
    pub failed: usize,
    pub keys_removed: usize,
    pub annotations_removed: usize,
}

/// Every file outcome of one run
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub files: Vec<FileOutcome>,
    pub summary: ReportSummary,
}

impl BatchReport {
    pub fn new(mut files: Vec<FileOutcome>) -> Self {
        files.sort_by(|a, b| a.input.cmp(&b.input));
        let mut summary = ReportSummary {
            files: files.len(),
            ..ReportSummary::default()
        };
        for outcome in &files {
            match outcome.status {
                FileStatus::Cleaned => summary.cleaned += 1,
                FileStatus::Unchanged => summary.unchanged += 1,
                FileStatus::Inspected => summary.inspected += 1,
                FileStatus::Failed => summary.failed += 1,
            }
            summary.keys_removed += outcome.keys_removed;
            summary.annotations_removed += outcome.annotations_removed;
        }
        Self {
            generated_at: Utc::now(),
            files,
            summary,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::ValidationError(format!("report serialization failed: {}", e)))
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), self.to_json()?)?;
        info!("Report written to {}", path.as_ref().display());
        Ok(())
    }

    pub fn log_summary(&self) {
        let s = &self.summary;
        info!(
            "{} files: {} cleaned, {} unchanged, {} inspected, {} failed ({} keys, {} annotations removed)",
            s.files,
            s.cleaned,
            s.unchanged,
            s.inspected,
            s.failed,
            s.keys_removed,
            s.annotations_removed
        );
        for outcome in self.files.iter().filter(|o| o.status == FileStatus::Failed) {
            warn!(
                "{}: {}",
                outcome.input.display(),
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }
    }
}
