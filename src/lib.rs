//! Main Library File for PDF link cleaning
//! Removes embedded URI links from batches of PDF documents: locates the
//! key that carries a matching URI in page content, strips it from the
//! page object graphs, drops matching link annotations and stamps fresh
//! document properties onto the cleaned copy.

// Configuration and core pipeline
pub mod config;
pub mod error;
pub mod pdf_document;
pub mod pipeline;
pub mod types;

// Page content scanning
pub mod scanner;

// Link removal
pub mod cleaner;

// Document properties
pub mod metadata;

// Batch reporting
pub mod report;

// Shared helpers
pub mod utils;

pub use cleaner::{InspectionState, Inspector, PassEvent, RemovalStats, UriPattern};
pub use config::CleanerConfig;
pub use error::{Error, Result};
pub use metadata::DocumentProperties;
pub use pdf_document::DocumentSession;
pub use pipeline::Pipeline;
pub use report::{BatchReport, FileOutcome, FileStatus};
pub use utils::Logger;
