// Shared types for the link cleaner

pub mod token;

pub use token::*;
