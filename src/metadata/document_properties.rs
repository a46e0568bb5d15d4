//! Document Info properties stamped onto cleaned documents
//! Author: kartik4091

use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::utils::metadata_utils::encode_text_string;

pub const DEFAULT_CREATOR: &str = "Adobe InDesign CS6";
pub const DEFAULT_PRODUCER: &str = "Adobe PDF Library 10.0.1";

/// User-supplied metadata written into the Info dictionary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentProperties {
    pub title: String,
    pub author: String,
    pub subject: String,
    pub creator: String,
    pub producer: String,
    pub keywords: String,
}

impl Default for DocumentProperties {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            subject: String::new(),
            creator: DEFAULT_CREATOR.to_string(),
            producer: DEFAULT_PRODUCER.to_string(),
            keywords: String::new(),
        }
    }
}

impl DocumentProperties {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            ..Self::default()
        }
    }

    /// Derive title and author from a file named `Author - Title.pdf`.
    ///
    /// The prefix marker is dropped from the stem first. A stem without `-`
    /// is taken as the author. Fields other than title and author come from
    /// `defaults`.
    pub fn from_file_name(path: &Path, prefix: Option<char>, defaults: &DocumentProperties) -> Self {
        let mut stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        if let Some(index) = prefix.and_then(|p| stem.find(p)) {
            stem.remove(index);
        }

        let mut parts = stem.splitn(2, '-').map(str::trim);
        let author = parts.next().unwrap_or_default().to_string();
        let title = parts.next().unwrap_or_default().to_string();

        Self {
            title,
            author,
            ..defaults.clone()
        }
    }

    /// Info dictionary keys paired with their values.
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("Title", self.title.as_str()),
            ("Author", self.author.as_str()),
            ("Subject", self.subject.as_str()),
            ("Creator", self.creator.as_str()),
            ("Producer", self.producer.as_str()),
            ("Keywords", self.keywords.as_str()),
        ]
    }

    /// Write all six fields into the document's Info dictionary, creating
    /// the dictionary when the trailer has none.
    pub fn apply(&self, document: &mut Document) -> Result<()> {
        let info_id = info_dictionary_id(document);
        let info = document.get_object_mut(info_id).and_then(Object::as_dict_mut)?;
        for (key, value) in self.fields() {
            info.set(key, encode_text_string(value));
        }
        debug!("Stamped document properties into Info {:?}", info_id);
        Ok(())
    }
}

fn info_dictionary_id(document: &mut Document) -> ObjectId {
    let existing = match document.trailer.get(b"Info") {
        Ok(Object::Reference(id)) => Some(*id),
        _ => None,
    };
    if let Some(id) = existing {
        if document.get_object(id).and_then(Object::as_dict).is_ok() {
            return id;
        }
    }

    // Inline or missing Info: promote it to an indirect object
    let inline = match document.trailer.remove(b"Info") {
        Some(Object::Dictionary(dict)) => dict,
        _ => Dictionary::new(),
    };
    let id = document.add_object(inline);
    document.trailer.set("Info", id);
    id
}
