use std::path::{Path, PathBuf};

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

/// Content for a page that carries a link key inside an inline dictionary.
pub const LINKED_CONTENT: &[u8] =
    b"/Link /Annot << /URI (https://spam.example/offer) >> DP BT /F1 12 Tf (Offer) Tj ET";

pub const PLAIN_CONTENT: &[u8] = b"BT /F1 12 Tf (Plain page) Tj ET";

/// One page of a fixture document
pub struct PageSpec {
    pub content: Vec<u8>,
    pub annotations: Vec<Object>,
}

impl PageSpec {
    pub fn plain() -> Self {
        Self::with_content(PLAIN_CONTENT)
    }

    pub fn with_content(content: &[u8]) -> Self {
        Self {
            content: content.to_vec(),
            annotations: Vec::new(),
        }
    }

    pub fn annotation(mut self, annotation: Object) -> Self {
        self.annotations.push(annotation);
        self
    }
}

pub struct TestFixtures;

impl TestFixtures {
    /// Link annotation with an inline URI action.
    pub fn link_annotation(uri: &str) -> Object {
        Object::Dictionary(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "Rect" => vec![0.into(), 0.into(), 100.into(), 20.into()],
            "A" => dictionary! {
                "Type" => "Action",
                "S" => "URI",
                "URI" => Object::string_literal(uri),
            },
        })
    }

    pub fn text_annotation() -> Object {
        Object::Dictionary(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Text",
            "Contents" => Object::string_literal("note"),
        })
    }

    pub fn document(pages: Vec<PageSpec>) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for spec in pages {
            let content_id = doc.add_object(Stream::new(dictionary! {}, spec.content));
            let mut page = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            };
            if !spec.annotations.is_empty() {
                let annots: Vec<Object> = spec
                    .annotations
                    .into_iter()
                    .map(|annot| doc.add_object(annot).into())
                    .collect();
                page.set("Annots", annots);
            }
            kids.push(doc.add_object(page).into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    /// Three pages; only the middle one links to the spam target, through
    /// both a content key and a link annotation.
    pub fn three_page_document() -> Document {
        Self::document(vec![
            PageSpec::plain().annotation(Self::text_annotation()),
            PageSpec::with_content(LINKED_CONTENT)
                .annotation(Self::link_annotation("https://spam.example/offer")),
            PageSpec::plain(),
        ])
    }

    pub fn write_pdf(dir: &Path, name: &str, mut document: Document) -> PathBuf {
        let path = dir.join(name);
        document.save(&path).unwrap();
        path
    }

    /// Debug rendering of a page dictionary, for before/after comparisons.
    pub fn page_snapshot(document: &Document, index: usize) -> String {
        format!("{:?}", Self::page_dictionary(document, index))
    }

    pub fn page_dictionary(document: &Document, index: usize) -> Dictionary {
        let page_id = Self::page_id(document, index);
        document.get_dictionary(page_id).unwrap().clone()
    }

    pub fn page_id(document: &Document, index: usize) -> ObjectId {
        *document.get_pages().get(&(index as u32 + 1)).unwrap()
    }

    /// Number of entries in the page's `/Annots` array.
    pub fn annotation_count(document: &Document, index: usize) -> usize {
        let page = Self::page_dictionary(document, index);
        match page.get(b"Annots") {
            Ok(Object::Array(items)) => items.len(),
            Ok(Object::Reference(id)) => document
                .get_object(*id)
                .and_then(Object::as_array)
                .map(Vec::len)
                .unwrap_or(0),
            _ => 0,
        }
    }

    /// True if `key` occurs in any dictionary reachable from the page
    /// without crossing `/Parent`, including inline content dictionaries.
    pub fn page_has_key(document: &Document, index: usize, key: &[u8]) -> bool {
        let page_id = Self::page_id(document, index);
        let mut visited = std::collections::HashSet::new();
        let mut pending = vec![Object::Reference(page_id)];
        while let Some(object) = pending.pop() {
            match object {
                Object::Reference(id) => {
                    if visited.insert(id) {
                        if let Ok(resolved) = document.get_object(id) {
                            pending.push(resolved.clone());
                        }
                    }
                }
                Object::Dictionary(dict) => {
                    for (name, value) in dict.iter() {
                        if name.as_slice() == key {
                            return true;
                        }
                        if name.as_slice() != b"Parent" {
                            pending.push(value.clone());
                        }
                    }
                }
                Object::Stream(stream) => pending.push(Object::Dictionary(stream.dict)),
                Object::Array(items) => pending.extend(items),
                _ => {}
            }
        }

        let content = document.get_page_content(page_id).unwrap_or_default();
        lopdf::content::Content::decode(&content)
            .map(|content| {
                content.operations.iter().any(|op| {
                    op.operands.iter().any(|operand| match operand {
                        Object::Dictionary(dict) => dict.has(key),
                        _ => false,
                    })
                })
            })
            .unwrap_or(false)
    }
}
