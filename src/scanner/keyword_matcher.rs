//! Keyword matcher over page content tokens
//!
//! Finds the name that precedes a value matching the URI pattern. A `/`
//! delimiter opens a pair, the first token inside the pair is the candidate
//! key, and each following token is tested against the pattern. A second `/`
//! closes the pair and drops the candidate.

use regex::Regex;
use tracing::trace;

use crate::types::Token;

/// Position of the scanner relative to a name pair
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum ScanState {
    #[default]
    Outside,
    InsidePair,
    InsidePairWith(String),
}

/// Single-pass matcher for one page and one pattern
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    pattern: Regex,
    state: ScanState,
    matched: Option<String>,
}

impl KeywordMatcher {
    pub fn new(pattern: &Regex) -> Self {
        Self {
            pattern: pattern.clone(),
            state: ScanState::Outside,
            matched: None,
        }
    }

    /// Scan `tokens` until a value matches. Returns true if this call
    /// recorded a match; the key stays available through [`Self::key`].
    pub fn find_match<I>(&mut self, tokens: I) -> bool
    where
        I: IntoIterator<Item = Token>,
    {
        for token in tokens {
            if token.is_name_delimiter() {
                self.state = match self.state {
                    ScanState::Outside => ScanState::InsidePair,
                    _ => ScanState::Outside,
                };
                continue;
            }

            self.state = match std::mem::take(&mut self.state) {
                ScanState::Outside => ScanState::Outside,
                ScanState::InsidePair if token.payload.is_empty() => ScanState::InsidePair,
                ScanState::InsidePair => ScanState::InsidePairWith(token.payload),
                ScanState::InsidePairWith(candidate) => {
                    if self.pattern.is_match(&token.payload) {
                        trace!("'{}' matched under key '{}'", token.payload, candidate);
                        self.matched = Some(candidate.clone());
                        self.state = ScanState::InsidePairWith(candidate);
                        return true;
                    }
                    ScanState::InsidePairWith(candidate)
                }
            };
        }
        false
    }

    /// Key of interest recorded by the last successful scan.
    pub fn key(&self) -> Option<&str> {
        self.matched.as_deref()
    }

    pub fn has_match(&self) -> bool {
        self.matched.is_some()
    }

    /// Candidate key accumulated inside the currently open pair.
    pub fn candidate(&self) -> Option<&str> {
        match &self.state {
            ScanState::InsidePairWith(candidate) => Some(candidate),
            _ => None,
        }
    }

    pub fn inside_pair(&self) -> bool {
        self.state != ScanState::Outside
    }
}
