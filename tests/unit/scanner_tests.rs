use pdf_link_cleaner::scanner::{KeywordMatcher, PageContent};
use pdf_link_cleaner::types::{Token, TokenKind};
use regex::Regex;

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(pattern: &str) -> KeywordMatcher {
        KeywordMatcher::new(&Regex::new(pattern).unwrap())
    }

    #[test]
    fn test_lexed_dictionary_reports_preceding_name() {
        let content = PageContent::new(
            0,
            b"/Link /Annot << /URI (https://spam.example/offer) >> DP".to_vec(),
        );
        let mut kwm = matcher(r"spam\.example");
        assert!(kwm.find_match(content.tokens()));
        assert_eq!(kwm.key(), Some("URI"));
    }

    #[test]
    fn test_hex_encoded_uri_is_decoded_before_matching() {
        // <...> spells "https://spam.example"
        let content = PageContent::new(
            3,
            b"/Target <68747470733a2f2f7370616d2e6578616d706c65> def".to_vec(),
        );
        let mut kwm = matcher("spam");
        assert!(kwm.find_match(content.tokens()));
        assert_eq!(kwm.key(), Some("Target"));
    }

    #[test]
    fn test_token_sequences_follow_pairing_rules() {
        // A string delimiter keeps the pair open
        let mut kwm = matcher("target");
        assert!(kwm.find_match(vec![
            Token::delimiter("/"),
            Token::name("Link"),
            Token::delimiter("("),
            Token::other("target-matching-pattern"),
        ]));
        assert_eq!(kwm.key(), Some("Link"));

        // Empty pair
        let mut kwm = matcher("x");
        assert!(!kwm.find_match(vec![
            Token::delimiter("/"),
            Token::delimiter("/"),
            Token::other("x"),
        ]));

        // Candidate tracking across three pairs
        let mut kwm = matcher("^pattern$");
        let mut tokens = vec![
            Token::delimiter("/"),
            Token::name("A"),
            Token::other("B"),
        ]
        .into_iter();
        assert!(!kwm.find_match(&mut tokens));
        assert_eq!(kwm.candidate(), Some("A"));

        assert!(!kwm.find_match(vec![Token::delimiter("/"), Token::other("C")]));
        assert_eq!(kwm.candidate(), None);
        assert!(!kwm.inside_pair());

        assert!(!kwm.find_match(vec![Token::delimiter("/"), Token::other("pattern")]));
        assert_eq!(kwm.candidate(), Some("pattern"));
        assert!(!kwm.has_match());
    }

    #[test]
    fn test_each_token_pass_is_independent() {
        let content = PageContent::new(1, b"/K (v) /L (w)".to_vec());
        let kinds: Vec<TokenKind> = content.tokens().map(|t| t.kind).collect();
        assert_eq!(kinds.len(), 10);
        assert_eq!(content.tokens().count(), kinds.len());
        assert_eq!(kinds[1], TokenKind::Name);
        assert_eq!(kinds[3], TokenKind::Other);
    }

    #[test]
    fn test_plain_text_never_matches() {
        let content = PageContent::new(0, b"BT (https://spam.example) Tj ET".to_vec());
        let mut kwm = matcher("spam");
        assert!(!kwm.find_match(content.tokens()));
        assert_eq!(kwm.key(), None);
    }
}
