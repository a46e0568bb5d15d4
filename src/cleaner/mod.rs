//! Cleaner modules for link removal
//! Author: kartik4091

pub mod inspector;
pub mod link_annotations;
pub mod structure_cleaner;

pub use inspector::{InspectionState, Inspector, PassEvent, RemovalStats, UriPattern};
pub use link_annotations::LinkAnnotations;
pub use structure_cleaner::StructureCleaner;
