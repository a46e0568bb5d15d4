//! Validators for input files

use std::path::Path;

/// Check if a given path carries a `.pdf` extension (any case)
pub fn is_valid_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Check if the file name of `path` contains the prefix marker
pub fn has_prefix(path: &Path, prefix: char) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().contains(prefix))
        .unwrap_or(false)
}
