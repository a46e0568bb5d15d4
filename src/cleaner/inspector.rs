//! Document Inspector
//! Author: kartik4091
//!
//! Drives the two phases of a link removal pass over one document. The locate
//! phase scans page content for the first value matching the URI pattern and
//! records the name that precedes it. The removal phase strips that name from
//! the object graph of every page in range and drops link annotations whose
//! URI matches.

use std::path::Path;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, info, instrument, trace, warn};

use crate::cleaner::link_annotations::LinkAnnotations;
use crate::cleaner::structure_cleaner::StructureCleaner;
use crate::error::{Error, Result};
use crate::metadata::DocumentProperties;
use crate::pdf_document::DocumentSession;
use crate::scanner::KeywordMatcher;

/// Compiled URI pattern together with its source text
#[derive(Debug, Clone)]
pub struct UriPattern {
    source: String,
    regex: Regex,
}

impl UriPattern {
    pub fn new(source: &str) -> Result<Self> {
        let regex = Regex::new(source).map_err(|e| Error::PatternError {
            pattern: source.to_string(),
            source: e,
        })?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// An empty pattern never triggers a pass.
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

/// Outcome of the most recent removal pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionState {
    /// No pass has run
    #[default]
    Unedited,
    /// A key was located but nothing was removed
    Ready,
    /// At least one dictionary key was removed
    Deleted,
    /// No value matched the pattern
    NoMatch,
}

/// Step of a removal pass that moves the state forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassEvent {
    /// The locate phase found a key on some page
    Located,
    /// The locate phase ran out of pages
    Exhausted,
    /// The removal phase dropped at least one dictionary entry
    KeysRemoved,
}

impl InspectionState {
    /// Every pass starts with a locate phase, so `Located` and `Exhausted`
    /// are accepted from any state. Keys can only be removed once a key was
    /// located; anywhere else the event leaves the state as it is.
    pub fn transition(self, event: PassEvent) -> InspectionState {
        use InspectionState::*;
        match (self, event) {
            (_, PassEvent::Located) => Ready,
            (_, PassEvent::Exhausted) => NoMatch,
            (Ready, PassEvent::KeysRemoved) => Deleted,
            (Unedited | Deleted | NoMatch, PassEvent::KeysRemoved) => self,
        }
    }
}

/// Counters from the most recent removal pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RemovalStats {
    pub keys_removed: usize,
    pub annotations_removed: usize,
    pub pages_visited: usize,
    pub malformed_skipped: usize,
}

impl RemovalStats {
    pub fn total(&self) -> usize {
        self.keys_removed + self.annotations_removed
    }
}

/// Key located on a page; consumed by the removal phase
#[derive(Debug)]
struct LocatedKey {
    name: String,
    page_index: usize,
}

#[derive(Debug)]
pub struct Inspector {
    session: DocumentSession,
    state: InspectionState,
    last_removal: RemovalStats,
}

impl Inspector {
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self::new(DocumentSession::open(path))
    }

    pub fn new(session: DocumentSession) -> Self {
        Self {
            session,
            state: InspectionState::Unedited,
            last_removal: RemovalStats::default(),
        }
    }

    pub fn state(&self) -> InspectionState {
        self.state
    }

    /// True once a pass removed a dictionary key.
    pub fn done(&self) -> bool {
        self.state == InspectionState::Deleted
    }

    pub fn last_removal(&self) -> RemovalStats {
        self.last_removal
    }

    pub fn session(&self) -> &DocumentSession {
        &self.session
    }

    /// Run one locate and removal pass starting at `start_page`.
    ///
    /// Nothing happens when no document is open, the document has no pages
    /// or the pattern is empty. A start page past the end scans from page 0.
    #[instrument(skip(self, pattern), fields(pattern = pattern.as_str()))]
    pub fn delete(&mut self, pattern: &UriPattern, start_page: usize) {
        self.last_removal = RemovalStats::default();
        if !self.session.is_open() || pattern.is_empty() {
            return;
        }
        let page_count = self.session.page_count();
        if page_count == 0 {
            warn!("No pages in {}", self.session.path().display());
            return;
        }
        let start = if start_page >= page_count {
            debug!("Start page {} out of range, scanning from 0", start_page);
            0
        } else {
            start_page
        };

        let Some(key) = self.locate(pattern, start) else {
            debug!("No value matches '{}'", pattern.as_str());
            self.state = self.state.transition(PassEvent::Exhausted);
            return;
        };

        info!("Key '{}' located on page {}", key.name, key.page_index);
        self.state = self.state.transition(PassEvent::Located);

        let stats = self.remove(key, pattern, start);
        if stats.keys_removed > 0 {
            self.state = self.state.transition(PassEvent::KeysRemoved);
        } else if stats.annotations_removed > 0 {
            debug!(
                "{} annotations removed but the key stayed in place",
                stats.annotations_removed
            );
        }
        self.last_removal = stats;
    }

    fn locate(&self, pattern: &UriPattern, start: usize) -> Option<LocatedKey> {
        (start..self.session.page_count()).find_map(|index| {
            let content = self.session.page_content(index)?;
            let mut matcher = KeywordMatcher::new(pattern.regex());
            if !matcher.find_match(content.tokens()) {
                return None;
            }
            matcher.key().map(|name| LocatedKey {
                name: name.to_string(),
                page_index: index,
            })
        })
    }

    fn remove(&mut self, key: LocatedKey, pattern: &UriPattern, start: usize) -> RemovalStats {
        let page_ids = self.session.page_ids().to_vec();
        let mut stats = RemovalStats::default();
        let Some(document) = self.session.document_mut() else {
            return stats;
        };

        let mut cleaner = StructureCleaner::new(&key.name, &page_ids);
        for (index, page_id) in page_ids.iter().copied().enumerate().skip(start) {
            // Annotations first: the graph walk would strip the URI they are matched on
            let mut annotations = LinkAnnotations::load(document, page_id);
            match annotations.remove_matching(document, pattern.regex()) {
                Ok(count) => stats.annotations_removed += count,
                Err(e) => warn!("Page {} annotations left untouched: {}", index, e),
            }
            let from_content = cleaner.clean_page_content(document, page_id);
            let from_graph = cleaner.clean_page(document, page_id);
            trace!(
                "Page {}: {} keys from content, {} from objects",
                index,
                from_content,
                from_graph
            );
            stats.pages_visited += 1;
        }

        stats.keys_removed = cleaner.removed();
        stats.malformed_skipped = cleaner.skipped();
        if stats.total() > 0 {
            let pruned = document.prune_objects();
            debug!("Pruned {} unreachable objects", pruned.len());
        }
        stats
    }

    /// Replace the document's Info properties.
    pub fn set_document_properties(&mut self, properties: &DocumentProperties) -> Result<()> {
        match self.session.document_mut() {
            Some(document) => properties.apply(document),
            None => Ok(()),
        }
    }

    pub fn write(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.session.write(path)
    }

    /// Debug rendering of the page dictionaries.
    pub fn structure(&self) -> String {
        self.session.describe_pages()
    }
}
