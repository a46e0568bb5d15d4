//! IO Utilities for file discovery and output handling
//! Author: kartik4091

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};

use super::validator::{has_prefix, is_valid_pdf};
use crate::error::Result;

/// Collects the PDF files below `directories`.
///
/// Only regular files with a `.pdf` extension are kept, and when `prefix` is
/// set only those whose file name contains it. The list is sorted so a batch
/// always runs in the same order.
#[instrument(skip(directories))]
pub fn discover_pdf_files(
    directories: &[PathBuf],
    prefix: Option<char>,
    recursive: bool,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for directory in directories {
        collect_dir(directory, prefix, recursive, &mut files)?;
    }
    files.sort();
    files.dedup();
    debug!("Discovered {} candidate files", files.len());
    Ok(files)
}

fn collect_dir(
    directory: &Path,
    prefix: Option<char>,
    recursive: bool,
    files: &mut Vec<PathBuf>,
) -> Result<()> {
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        if file_type.is_dir() {
            if recursive {
                collect_dir(&path, prefix, recursive, files)?;
            }
            continue;
        }

        if !is_readable_file(&path) || !is_valid_pdf(&path) {
            continue;
        }
        if let Some(prefix) = prefix {
            if !has_prefix(&path, prefix) {
                continue;
            }
        }
        files.push(path);
    }
    Ok(())
}

/// Output path for a cleaned copy of `input`.
///
/// The first occurrence of the prefix marker is removed from the file name;
/// without a prefix the document is cleaned in place.
pub fn output_path(input: &Path, prefix: Option<char>) -> PathBuf {
    let Some(prefix) = prefix else {
        return input.to_path_buf();
    };
    let Some(name) = input.file_name().map(|n| n.to_string_lossy().into_owned()) else {
        return input.to_path_buf();
    };
    match name.find(prefix) {
        Some(index) => {
            let mut stripped = name;
            stripped.remove(index);
            input.with_file_name(stripped)
        }
        None => input.to_path_buf(),
    }
}

/// Sibling path used while a document is being written.
pub fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}

/// Checks if a path is a regular readable file.
pub fn is_readable_file(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

/// Renames a file safely (overwriting target if necessary).
pub fn safe_rename(from: &Path, to: &Path) -> Result<()> {
    if to.exists() {
        fs::remove_file(to)?;
    }
    fs::rename(from, to)?;
    Ok(())
}
