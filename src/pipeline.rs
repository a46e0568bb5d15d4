//! Link cleaning pipeline
//! Author: kartik4091
//! Created: 2025-06-05
//!
//! Runs every discovered document through open, link removal for each URI
//! pattern, property stamping and write-back. Documents are independent and
//! processed in parallel, one worker per document.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::{debug, error, info, instrument, trace, Level};

use crate::cleaner::{InspectionState, Inspector, UriPattern};
use crate::config::CleanerConfig;
use crate::error::Result;
use crate::metadata::DocumentProperties;
use crate::pdf_document::DocumentSession;
use crate::report::{BatchReport, FileOutcome, FileStatus};
use crate::utils::io::{discover_pdf_files, output_path};

#[derive(Debug)]
pub struct Pipeline {
    config: CleanerConfig,
    patterns: Vec<UriPattern>,
}

impl Pipeline {
    /// Validate `config` and compile its URI patterns.
    pub fn new(config: CleanerConfig) -> Result<Self> {
        config.validate()?;
        let patterns = config
            .uri_patterns
            .iter()
            .map(|source| UriPattern::new(source))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { config, patterns })
    }

    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    pub fn patterns(&self) -> &[UriPattern] {
        &self.patterns
    }

    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        discover_pdf_files(&self.config.directories, self.config.prefix, self.config.recursive)
    }

    /// Discover and clean every document.
    pub fn execute(&self) -> Result<BatchReport> {
        let files = self.discover()?;
        info!("Processing {} documents", files.len());
        self.run(&files)
    }

    /// Clean `files`, one worker per document.
    pub fn run(&self, files: &[PathBuf]) -> Result<BatchReport> {
        let process = || -> Vec<FileOutcome> {
            files
                .par_iter()
                .map(|input| {
                    self.clean_file(input).unwrap_or_else(|e| {
                        error!("{}: {}", input.display(), e);
                        FileOutcome::failed(input, &e)
                    })
                })
                .collect()
        };

        let outcomes = match self.config.jobs {
            Some(jobs) => ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()?
                .install(process),
            None => process(),
        };
        Ok(BatchReport::new(outcomes))
    }

    /// Clean a single document. Patterns are tried in order until one
    /// removes a dictionary key; only then is the cleaned copy written.
    #[instrument(skip(self, input), fields(file = %input.display()))]
    pub fn clean_file(&self, input: &Path) -> Result<FileOutcome> {
        let mut inspector = Inspector::new(DocumentSession::try_open(input)?);

        let mut outcome = FileOutcome {
            input: input.to_path_buf(),
            output: None,
            status: FileStatus::Unchanged,
            state: InspectionState::Unedited,
            pattern: None,
            keys_removed: 0,
            annotations_removed: 0,
            replaced: false,
            error: None,
        };

        for pattern in &self.patterns {
            inspector.delete(pattern, self.config.start_page);
            let stats = inspector.last_removal();
            debug!("'{}' -> {:?} {:?}", pattern.as_str(), inspector.state(), stats);
            outcome.state = inspector.state();
            if inspector.done() {
                outcome.pattern = Some(pattern.as_str().to_string());
                outcome.keys_removed = stats.keys_removed;
                outcome.annotations_removed = stats.annotations_removed;
                break;
            }
        }

        if tracing::enabled!(Level::TRACE) {
            trace!("Structure after cleaning:\n{}", inspector.structure());
        }

        if !inspector.done() {
            info!("{}: no link removed, left untouched", input.display());
            return Ok(outcome);
        }
        if self.config.dry_run {
            outcome.status = FileStatus::Inspected;
            return Ok(outcome);
        }

        let properties =
            DocumentProperties::from_file_name(input, self.config.prefix, &self.config.properties);
        inspector.set_document_properties(&properties)?;

        let output = output_path(input, self.config.prefix);
        inspector.write(&output)?;
        outcome.output = Some(output.clone());
        outcome.status = FileStatus::Cleaned;

        if self.config.replace && self.config.prefix.is_some() && output != input {
            fs::remove_file(input)?;
            outcome.replaced = true;
            debug!("Removed original {}", input.display());
        }

        info!(
            "{} -> {} ({} keys, {} annotations)",
            input.display(),
            output.display(),
            outcome.keys_removed,
            outcome.annotations_removed
        );
        Ok(outcome)
    }
}
