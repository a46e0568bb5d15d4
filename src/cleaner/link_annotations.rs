//! Link annotations of a single page
//!
//! Indexed view over a page's `/Annots` array exposing the URI of each
//! annotation's link action. The array may live inline in the page
//! dictionary or in an indirect object; removal edits it where it lives.

use lopdf::{Document, Object, ObjectId};
use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::utils::metadata_utils::object_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnnotsLocation {
    Inline,
    Indirect(ObjectId),
    Missing,
}

/// Annotation list of one page with the URI of each link action
#[derive(Debug, Clone)]
pub struct LinkAnnotations {
    page_id: ObjectId,
    location: AnnotsLocation,
    uris: Vec<Option<String>>,
}

fn resolve<'a>(document: &'a Document, object: &'a Object) -> Option<&'a Object> {
    match object {
        Object::Reference(id) => document.get_object(*id).ok(),
        other => Some(other),
    }
}

/// URI of the annotation's `/A` action, if it has one.
fn link_uri(document: &Document, entry: &Object) -> Option<String> {
    let annotation = resolve(document, entry)?.as_dict().ok()?;
    let action = resolve(document, annotation.get(b"A").ok()?)?.as_dict().ok()?;
    let uri = resolve(document, action.get(b"URI").ok()?)?;
    object_text(uri)
}

impl LinkAnnotations {
    pub fn load(document: &Document, page_id: ObjectId) -> Self {
        let annots = document
            .get_dictionary(page_id)
            .and_then(|page| page.get(b"Annots"));

        let (location, entries): (AnnotsLocation, &[Object]) = match annots {
            Ok(Object::Array(items)) => (AnnotsLocation::Inline, items.as_slice()),
            Ok(Object::Reference(id)) => match document.get_object(*id) {
                Ok(Object::Array(items)) => (AnnotsLocation::Indirect(*id), items.as_slice()),
                _ => (AnnotsLocation::Missing, &[]),
            },
            _ => (AnnotsLocation::Missing, &[]),
        };

        Self {
            page_id,
            location,
            uris: entries.iter().map(|entry| link_uri(document, entry)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.uris.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uris.is_empty()
    }

    /// URI of the link action of annotation `index`.
    pub fn uri(&self, index: usize) -> Option<&str> {
        self.uris.get(index)?.as_deref()
    }

    fn annots_mut<'d>(&self, document: &'d mut Document) -> Result<&'d mut Vec<Object>> {
        match self.location {
            AnnotsLocation::Inline => Ok(document
                .get_object_mut(self.page_id)?
                .as_dict_mut()?
                .get_mut(b"Annots")?
                .as_array_mut()?),
            AnnotsLocation::Indirect(id) => Ok(document.get_object_mut(id)?.as_array_mut()?),
            AnnotsLocation::Missing => Err(Error::ValidationError(format!(
                "page {:?} has no annotation array",
                self.page_id
            ))),
        }
    }

    /// Remove annotation `index` from the page.
    pub fn remove(&mut self, document: &mut Document, index: usize) -> Result<()> {
        if index >= self.uris.len() {
            return Err(Error::ValidationError(format!(
                "annotation index {} out of range ({} annotations)",
                index,
                self.uris.len()
            )));
        }
        let annots = self.annots_mut(document)?;
        if index < annots.len() {
            annots.remove(index);
        }
        self.uris.remove(index);
        Ok(())
    }

    /// Remove every annotation whose link URI matches `pattern`.
    pub fn remove_matching(&mut self, document: &mut Document, pattern: &Regex) -> Result<usize> {
        let mut removed = 0;
        for index in (0..self.len()).rev() {
            if self.uri(index).is_some_and(|uri| pattern.is_match(uri)) {
                debug!("Removing link annotation {} on page {:?}", index, self.page_id);
                self.remove(document, index)?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}
