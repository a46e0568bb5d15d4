//! Structure Cleaner
//! Author: kartik4091
//!
//! Removes one dictionary key from everything reachable from a page: the page
//! dictionary itself, its resources, annotations, actions and the inline
//! dictionaries that appear as operands in the page content. Indirect
//! references are followed once per cleaner; `/Parent` edges and references
//! to other pages are not followed.

use std::collections::HashSet;

use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, trace, warn};

#[derive(Debug, Clone)]
pub struct StructureCleaner {
    /// Key to strip
    key: Vec<u8>,
    /// Page objects; walks never cross from one page into another
    pages: HashSet<ObjectId>,
    visited: HashSet<ObjectId>,
    removed: usize,
    skipped: usize,
}

impl StructureCleaner {
    pub fn new(key: &str, page_ids: &[ObjectId]) -> Self {
        Self {
            key: key.as_bytes().to_vec(),
            pages: page_ids.iter().copied().collect(),
            visited: HashSet::new(),
            removed: 0,
            skipped: 0,
        }
    }

    /// Total keys removed so far.
    pub fn removed(&self) -> usize {
        self.removed
    }

    /// Null values, dangling references and undecodable content met so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Strip the key from the object graph rooted at `page_id`.
    /// Returns the number of keys removed by this call.
    pub fn clean_page(&mut self, document: &mut Document, page_id: ObjectId) -> usize {
        let before = self.removed;
        let mut pending = vec![page_id];

        while let Some(id) = pending.pop() {
            if !self.visited.insert(id) {
                continue;
            }
            match document.get_object_mut(id) {
                Ok(object) => self.clean_object(object, &mut pending),
                Err(e) => {
                    self.skipped += 1;
                    debug!("Skipping unresolved reference {:?}: {}", id, e);
                }
            }
        }

        self.removed - before
    }

    /// Strip the key from inline dictionaries in the page content stream.
    /// The content is re-encoded only when something was removed.
    pub fn clean_page_content(&mut self, document: &mut Document, page_id: ObjectId) -> usize {
        let bytes = match document.get_page_content(page_id) {
            Ok(bytes) if !bytes.is_empty() => bytes,
            Ok(_) => return 0,
            Err(e) => {
                debug!("No content for page {:?}: {}", page_id, e);
                return 0;
            }
        };
        let mut content = match Content::decode(&bytes) {
            Ok(content) => content,
            Err(e) => {
                self.skipped += 1;
                debug!("Undecodable content on page {:?}: {}", page_id, e);
                return 0;
            }
        };

        let before = self.removed;
        // Operands never hold references
        let mut unused = Vec::new();
        for operation in content.operations.iter_mut() {
            for operand in operation.operands.iter_mut() {
                self.clean_object(operand, &mut unused);
            }
        }
        let removed = self.removed - before;
        if removed == 0 {
            return 0;
        }

        let updated = content
            .encode()
            .and_then(|encoded| document.change_page_content(page_id, encoded));
        if let Err(e) = updated {
            warn!("Failed to rewrite content of page {:?}: {}", page_id, e);
            self.removed = before;
            return 0;
        }
        removed
    }

    fn follow(&mut self, id: ObjectId, pending: &mut Vec<ObjectId>) {
        if self.pages.contains(&id) || self.visited.contains(&id) {
            return;
        }
        pending.push(id);
    }

    fn clean_object(&mut self, object: &mut Object, pending: &mut Vec<ObjectId>) {
        match object {
            Object::Dictionary(dict) => self.clean_dictionary(dict, pending),
            Object::Stream(stream) => self.clean_dictionary(&mut stream.dict, pending),
            Object::Array(items) => {
                for item in items.iter_mut() {
                    self.clean_object(item, pending);
                }
            }
            Object::Reference(id) => self.follow(*id, pending),
            _ => {}
        }
    }

    fn clean_dictionary(&mut self, dict: &mut Dictionary, pending: &mut Vec<ObjectId>) {
        let keys: Vec<Vec<u8>> = dict.iter().map(|(key, _)| key.clone()).collect();
        for key in keys {
            if matches!(dict.get(&key), Ok(Object::Null)) {
                self.skipped += 1;
                trace!("Null value under /{}", String::from_utf8_lossy(&key));
                continue;
            }
            if key == self.key {
                dict.remove(&key);
                self.removed += 1;
                trace!("Removed /{}", String::from_utf8_lossy(&key));
                continue;
            }
            if key == b"Parent" {
                continue;
            }
            if let Ok(value) = dict.get_mut(&key) {
                self.clean_object(value, pending);
            }
        }
    }
}
