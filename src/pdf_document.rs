//! PDF Document session
//! Author: kartik4905
//!
//! Owns one opened document for the lifetime of one cleaning run. A document
//! that cannot be parsed leaves the session empty; every accessor then
//! reports nothing and writing is a no-op.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use lopdf::{Document, ObjectId};
use tracing::{debug, error, instrument};

use crate::error::{Error, Result};
use crate::scanner::PageContent;
use crate::utils::io::{safe_rename, temp_sibling};

/// One opened document keyed by its input path
#[derive(Debug)]
pub struct DocumentSession {
    path: PathBuf,
    document: Option<Document>,
    pages: Vec<ObjectId>,
}

impl DocumentSession {
    /// Open `path`, logging and swallowing parse failures.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        match Self::try_open(&path) {
            Ok(session) => session,
            Err(e) => {
                error!("{}", e);
                Self {
                    path,
                    document: None,
                    pages: Vec::new(),
                }
            }
        }
    }

    /// Open `path`, returning the parse failure to the caller.
    pub fn try_open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let document = Document::load(&path).map_err(|source| Error::OpenError {
            path: path.clone(),
            source,
        })?;
        Ok(Self::from_document(path, document))
    }

    /// Wrap an already loaded document.
    pub fn from_document(path: impl Into<PathBuf>, document: Document) -> Self {
        let pages = document.get_pages().into_values().collect();
        Self {
            path: path.into(),
            document: Some(document),
            pages,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.document.is_some()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Object id of the page at `index`, in page order.
    pub fn page(&self, index: usize) -> Option<ObjectId> {
        self.pages.get(index).copied()
    }

    pub fn page_ids(&self) -> &[ObjectId] {
        &self.pages
    }

    /// Decoded content of the page at `index`. Unreadable content yields an
    /// empty page rather than an error.
    pub fn page_content(&self, index: usize) -> Option<PageContent> {
        let document = self.document.as_ref()?;
        let page_id = self.page(index)?;
        let bytes = match document.get_page_content(page_id) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("Page {} content unreadable: {}", index, e);
                Vec::new()
            }
        };
        Some(PageContent::new(index, bytes))
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn document_mut(&mut self) -> Option<&mut Document> {
        self.document.as_mut()
    }

    /// Debug rendering of every page dictionary.
    pub fn describe_pages(&self) -> String {
        let mut out = String::new();
        let Some(document) = self.document.as_ref() else {
            return out;
        };
        for (index, page_id) in self.pages.iter().enumerate() {
            match document.get_dictionary(*page_id) {
                Ok(dict) => {
                    let _ = writeln!(out, "page {} {:?}: {:?}", index, page_id, dict);
                }
                Err(e) => {
                    let _ = writeln!(out, "page {} {:?}: <{}>", index, page_id, e);
                }
            }
        }
        out
    }

    /// Serialize the in-memory document to `path`.
    ///
    /// The document is written to a sibling `.part` file first and renamed
    /// over the target only once the write succeeded.
    #[instrument(skip_all)]
    pub fn write(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let target = path.as_ref();
        let Some(document) = self.document.as_mut() else {
            debug!("No document open, nothing written to {}", target.display());
            return Ok(());
        };

        let temp = temp_sibling(target);
        if let Err(source) = document.save(&temp) {
            let _ = fs::remove_file(&temp);
            return Err(Error::WriteError {
                path: target.to_path_buf(),
                source,
            });
        }
        safe_rename(&temp, target)?;
        debug!("Wrote {}", target.display());
        Ok(())
    }
}
