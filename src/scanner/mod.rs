//! Scanner Module
//! Author: kartik4091
//!
//! Page content lexing and key-of-interest detection.

pub mod content_scanner;
pub mod keyword_matcher;

pub use content_scanner::{ContentTokenizer, PageContent};
pub use keyword_matcher::KeywordMatcher;
