//! Lexical units of a page content stream

use std::fmt;

/// The delimiter that introduces a PDF name object.
pub const NAME_DELIMITER: &str = "/";

/// Type tag of a content stream token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Structural characters: `/ ( ) < > << >> [ ] { }`
    Delimiter,
    /// Body of a name object, without its leading `/`
    Name,
    /// Operators, numbers, keywords and decoded string bodies
    Other,
}

/// A single token produced by the content scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub payload: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(payload: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            payload: payload.into(),
            kind,
        }
    }

    pub fn delimiter(payload: impl Into<String>) -> Self {
        Self::new(payload, TokenKind::Delimiter)
    }

    pub fn name(payload: impl Into<String>) -> Self {
        Self::new(payload, TokenKind::Name)
    }

    pub fn other(payload: impl Into<String>) -> Self {
        Self::new(payload, TokenKind::Other)
    }

    /// True for the `/` delimiter that opens and closes name pairs.
    pub fn is_name_delimiter(&self) -> bool {
        self.kind == TokenKind::Delimiter && self.payload == NAME_DELIMITER
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind, self.payload)
    }
}
