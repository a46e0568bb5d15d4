use pdf_link_cleaner::cleaner::{InspectionState, Inspector, UriPattern};
use pdf_link_cleaner::metadata::{DocumentProperties, DEFAULT_CREATOR, DEFAULT_PRODUCER};
use pdf_link_cleaner::pdf_document::DocumentSession;
use pdf_link_cleaner::utils::metadata_utils::object_text;

use lopdf::{dictionary, Document, Object};

use crate::fixtures::{PageSpec, TestFixtures, LINKED_CONTENT};

#[cfg(test)]
mod tests {
    use super::*;

    fn inspector(document: Document) -> Inspector {
        Inspector::new(DocumentSession::from_document("fixture.pdf", document))
    }

    fn spam() -> UriPattern {
        UriPattern::new(r"spam\.example").unwrap()
    }

    fn document(inspector: &Inspector) -> &Document {
        inspector.session().document().unwrap()
    }

    #[test]
    fn test_zero_page_document_is_left_alone() {
        let mut inspector = inspector(TestFixtures::document(vec![]));
        inspector.delete(&spam(), 0);
        assert!(!inspector.done());
        assert_eq!(inspector.state(), InspectionState::Unedited);
    }

    #[test]
    fn test_unmatched_pattern_mutates_nothing() {
        let original = TestFixtures::three_page_document();
        let mut inspector = inspector(original.clone());
        inspector.delete(&UriPattern::new("nowhere\\.example").unwrap(), 0);

        assert_eq!(inspector.state(), InspectionState::NoMatch);
        assert!(!inspector.done());
        for index in 0..3 {
            assert_eq!(
                TestFixtures::page_snapshot(document(&inspector), index),
                TestFixtures::page_snapshot(&original, index)
            );
            assert_eq!(
                TestFixtures::annotation_count(document(&inspector), index),
                TestFixtures::annotation_count(&original, index)
            );
        }
        assert!(TestFixtures::page_has_key(document(&inspector), 1, b"URI"));
    }

    #[test]
    fn test_single_key_is_removed_everywhere() {
        let mut inspector = inspector(TestFixtures::document(vec![PageSpec::with_content(
            LINKED_CONTENT,
        )]));
        inspector.delete(&spam(), 0);

        assert!(inspector.done());
        assert_eq!(inspector.last_removal().keys_removed, 1);
        assert_eq!(inspector.last_removal().annotations_removed, 0);
        assert!(!TestFixtures::page_has_key(document(&inspector), 0, b"URI"));
    }

    #[test]
    fn test_second_delete_finds_nothing() {
        let mut inspector = inspector(TestFixtures::three_page_document());
        inspector.delete(&spam(), 0);
        assert_eq!(inspector.state(), InspectionState::Deleted);

        inspector.delete(&spam(), 0);
        assert_eq!(inspector.state(), InspectionState::NoMatch);
        assert!(!inspector.done());
        assert_eq!(inspector.last_removal().total(), 0);
    }

    #[test]
    fn test_annotation_removed_without_matching_dictionary_key() {
        // The key is located in a literal string operand and lives in no dictionary
        let doc = TestFixtures::document(vec![PageSpec::with_content(
            b"/Tag (https://spam.example/offer) Tj",
        )
        .annotation(TestFixtures::link_annotation("https://spam.example/offer"))
        .annotation(TestFixtures::text_annotation())]);
        let mut inspector = inspector(doc);
        inspector.delete(&spam(), 0);

        let stats = inspector.last_removal();
        assert_eq!(stats.keys_removed, 0);
        assert_eq!(stats.annotations_removed, 1);
        assert_eq!(inspector.state(), InspectionState::Ready);
        assert!(!inspector.done());
        assert_eq!(TestFixtures::annotation_count(document(&inspector), 0), 1);
    }

    #[test]
    fn test_annotation_only_pass_never_reports_deleted() {
        let doc = TestFixtures::document(vec![PageSpec::with_content(
            b"/Tag (https://spam.example) Tj",
        )
        .annotation(TestFixtures::link_annotation("https://spam.example"))]);
        let mut inspector = inspector(doc);

        inspector.delete(&spam(), 0);
        assert_eq!(inspector.last_removal().annotations_removed, 1);
        assert_ne!(inspector.state(), InspectionState::Deleted);

        // The located value is still in the content, so it is found again
        inspector.delete(&spam(), 0);
        assert_eq!(inspector.state(), InspectionState::Ready);
        assert_eq!(inspector.last_removal().total(), 0);
        assert!(!inspector.done());
    }

    #[test]
    fn test_dictionary_key_removed_without_matching_annotation() {
        let doc = TestFixtures::document(vec![PageSpec::with_content(LINKED_CONTENT)
            .annotation(TestFixtures::text_annotation())]);
        let mut inspector = inspector(doc);
        inspector.delete(&spam(), 0);

        let stats = inspector.last_removal();
        assert_eq!(stats.keys_removed, 1);
        assert_eq!(stats.annotations_removed, 0);
        assert_eq!(TestFixtures::annotation_count(document(&inspector), 0), 1);
    }

    #[test]
    fn test_key_and_annotation_removed_together() {
        let doc = TestFixtures::document(vec![PageSpec::with_content(LINKED_CONTENT)
            .annotation(TestFixtures::link_annotation("https://spam.example/a"))
            .annotation(TestFixtures::link_annotation("https://spam.example/b"))]);
        let mut inspector = inspector(doc);
        inspector.delete(&spam(), 0);

        let stats = inspector.last_removal();
        assert_eq!(stats.keys_removed, 1);
        assert_eq!(stats.annotations_removed, 2);
        assert_eq!(TestFixtures::annotation_count(document(&inspector), 0), 0);
        assert!(!TestFixtures::page_has_key(document(&inspector), 0, b"URI"));
    }

    #[test]
    fn test_three_page_document_only_middle_page_changes() {
        let original = TestFixtures::three_page_document();
        let mut inspector = inspector(original.clone());
        inspector.delete(&spam(), 0);

        assert!(inspector.done());
        let cleaned = document(&inspector);
        for index in [0, 2] {
            assert_eq!(
                TestFixtures::page_snapshot(cleaned, index),
                TestFixtures::page_snapshot(&original, index)
            );
            assert_eq!(
                cleaned.get_page_content(TestFixtures::page_id(cleaned, index)).unwrap(),
                original.get_page_content(TestFixtures::page_id(&original, index)).unwrap()
            );
        }
        assert_eq!(TestFixtures::annotation_count(cleaned, 0), 1);
        assert_eq!(TestFixtures::annotation_count(cleaned, 1), 0);
        assert!(!TestFixtures::page_has_key(cleaned, 1, b"URI"));
    }

    #[test]
    fn test_indirect_annots_array_and_action() {
        let mut doc = TestFixtures::document(vec![PageSpec::with_content(
            b"/Tag (https://spam.example) Tj",
        )]);
        let action_id = doc.add_object(dictionary! {
            "S" => "URI",
            "URI" => Object::string_literal("https://spam.example/deep"),
        });
        let annot_id = doc.add_object(dictionary! { "Subtype" => "Link", "A" => action_id });
        let annots_id = doc.add_object(Object::Array(vec![annot_id.into()]));
        let page_id = TestFixtures::page_id(&doc, 0);
        doc.get_object_mut(page_id)
            .and_then(Object::as_dict_mut)
            .unwrap()
            .set("Annots", annots_id);

        let mut inspector = inspector(doc);
        inspector.delete(&spam(), 0);
        assert_eq!(inspector.last_removal().annotations_removed, 1);
        assert_eq!(TestFixtures::annotation_count(document(&inspector), 0), 0);
    }

    #[test]
    fn test_metadata_defaults_are_stamped() {
        let mut inspector = inspector(TestFixtures::three_page_document());
        inspector
            .set_document_properties(&DocumentProperties::new("T", "A"))
            .unwrap();

        let doc = document(&inspector);
        let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let info = doc.get_dictionary(info_id).unwrap();
        let text = |key: &str| object_text(info.get(key.as_bytes()).unwrap()).unwrap();
        assert_eq!(text("Title"), "T");
        assert_eq!(text("Author"), "A");
        assert_eq!(text("Creator"), DEFAULT_CREATOR);
        assert_eq!(text("Producer"), DEFAULT_PRODUCER);
        assert_eq!(text("Subject"), "");
        assert_eq!(text("Keywords"), "");
    }
}
