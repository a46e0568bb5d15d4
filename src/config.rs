//! Configuration types and validation for the link cleaner
//! Author: kartik4091
//! Created: 2025-06-03

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::metadata::DocumentProperties;

/// Settings for one batch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    /// Directories scanned for PDF files
    pub directories: Vec<PathBuf>,
    /// URI patterns, applied in order
    pub uri_patterns: Vec<String>,
    /// Marker character selecting files to process
    pub prefix: Option<char>,
    /// Zero-based page the scan starts from
    pub start_page: usize,
    /// Delete the marked original once its cleaned copy is written
    pub replace: bool,
    pub recursive: bool,
    /// Scan and report only; nothing is written
    pub dry_run: bool,
    /// Worker threads; the global rayon pool when unset
    pub jobs: Option<usize>,
    /// Info fields other than title and author
    pub properties: DocumentProperties,
    /// JSON batch report destination
    pub report: Option<PathBuf>,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            directories: Vec::new(),
            uri_patterns: Vec::new(),
            prefix: Some('_'),
            start_page: 0,
            replace: false,
            recursive: false,
            dry_run: false,
            jobs: None,
            properties: DocumentProperties::default(),
            report: None,
        }
    }
}

impl CleanerConfig {
    /// Load a configuration file, JSON first and YAML otherwise.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;

        match serde_json::from_str(&text) {
            Ok(config) => Ok(config),
            Err(json_err) => {
                debug!("{} is not JSON ({}), trying YAML", path.display(), json_err);
                serde_yaml::from_str(&text).map_err(|e| {
                    Error::ConfigError(format!("cannot parse {}: {}", path.display(), e))
                })
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.directories.is_empty() {
            return Err(Error::ValidationError("no directory given".into()));
        }
        if self.uri_patterns.is_empty() {
            return Err(Error::ValidationError("no URI pattern given".into()));
        }
        if self.uri_patterns.iter().any(String::is_empty) {
            return Err(Error::ValidationError("URI patterns must not be empty".into()));
        }
        if self.prefix == Some('\0') {
            return Err(Error::ValidationError("prefix must be a printable character".into()));
        }
        if self.jobs == Some(0) {
            return Err(Error::ValidationError("jobs must be at least 1".into()));
        }
        Ok(())
    }
}
