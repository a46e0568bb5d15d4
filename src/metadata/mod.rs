//! Metadata handling module for cleaned documents
//! Author: kartik4091

pub mod document_properties;

pub use document_properties::{DocumentProperties, DEFAULT_CREATOR, DEFAULT_PRODUCER};
