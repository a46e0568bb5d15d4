//! Utility Module Implementation
//! Author: kartik4091
//!
//! Aggregates internal helpers: logging, file discovery, validation and
//! PDF text string handling.

pub mod io;
pub mod logger;
pub mod metadata_utils;
pub mod validator;

pub use self::{
    io::{discover_pdf_files, output_path},
    logger::Logger,
    metadata_utils::{decode_text_string, encode_text_string},
    validator::is_valid_pdf,
};
