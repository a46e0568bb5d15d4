//! Content Scanner Implementation
//! Author: kartik4091
//!
//! Lazy lexer over the decoded content stream of a single page. The lexer
//! keeps the delimiters as tokens of their own, so `/Link` becomes a `/`
//! delimiter followed by the name `Link`, and `(text)` becomes `(`, the
//! decoded string body and `)`.

use std::collections::VecDeque;

use crate::types::{Token, NAME_DELIMITER};
use crate::utils::metadata_utils::decode_text_string;

/// Decoded content of one page
#[derive(Debug, Clone)]
pub struct PageContent {
    page_index: usize,
    bytes: Vec<u8>,
}

impl PageContent {
    pub fn new(page_index: usize, bytes: Vec<u8>) -> Self {
        Self { page_index, bytes }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// A fresh, independent token sequence over the page content.
    pub fn tokens(&self) -> ContentTokenizer<'_> {
        ContentTokenizer::new(&self.bytes)
    }
}

/// Forward-only token iterator over content stream bytes
#[derive(Debug)]
pub struct ContentTokenizer<'a> {
    data: &'a [u8],
    pos: usize,
    pending: VecDeque<Token>,
}

fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b'\0' | b'\t' | b'\n' | b'\x0c' | b'\r' | b' ')
}

fn is_delimiter(byte: u8) -> bool {
    matches!(
        byte,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

fn is_regular(byte: u8) -> bool {
    !is_whitespace(byte) && !is_delimiter(byte)
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

impl<'a> ContentTokenizer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            pending: VecDeque::new(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.data.get(self.pos + offset).copied()
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(byte) = self.peek() {
            if is_whitespace(byte) {
                self.pos += 1;
            } else if byte == b'%' {
                while let Some(byte) = self.peek() {
                    if byte == b'\n' || byte == b'\r' {
                        break;
                    }
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    fn take_regular(&mut self) -> &'a [u8] {
        let start = self.pos;
        while matches!(self.peek(), Some(byte) if is_regular(byte)) {
            self.pos += 1;
        }
        &self.data[start..self.pos]
    }

    /// Name body with `#xx` escapes resolved.
    fn take_name(&mut self) -> Vec<u8> {
        let raw = self.take_regular();
        let mut name = Vec::with_capacity(raw.len());
        let mut i = 0;
        while i < raw.len() {
            if raw[i] == b'#' {
                if let (Some(hi), Some(lo)) = (
                    raw.get(i + 1).copied().and_then(hex_value),
                    raw.get(i + 2).copied().and_then(hex_value),
                ) {
                    name.push((hi << 4) | lo);
                    i += 3;
                    continue;
                }
            }
            name.push(raw[i]);
            i += 1;
        }
        name
    }

    /// Literal string body after the opening `(`. Returns the decoded bytes
    /// and whether the closing `)` was found.
    fn take_literal_string(&mut self) -> (Vec<u8>, bool) {
        let mut body = Vec::new();
        let mut depth = 1usize;
        while let Some(byte) = self.peek() {
            self.pos += 1;
            match byte {
                b'\\' => {
                    let Some(escaped) = self.peek() else { break };
                    self.pos += 1;
                    match escaped {
                        b'n' => body.push(b'\n'),
                        b'r' => body.push(b'\r'),
                        b't' => body.push(b'\t'),
                        b'b' => body.push(0x08),
                        b'f' => body.push(0x0c),
                        b'0'..=b'7' => {
                            let mut value = u32::from(escaped - b'0');
                            for _ in 0..2 {
                                match self.peek() {
                                    Some(digit @ b'0'..=b'7') => {
                                        value = value * 8 + u32::from(digit - b'0');
                                        self.pos += 1;
                                    }
                                    _ => break,
                                }
                            }
                            body.push((value & 0xff) as u8);
                        }
                        b'\r' => {
                            if self.peek() == Some(b'\n') {
                                self.pos += 1;
                            }
                        }
                        b'\n' => {}
                        other => body.push(other),
                    }
                }
                b'(' => {
                    depth += 1;
                    body.push(byte);
                }
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return (body, true);
                    }
                    body.push(byte);
                }
                _ => body.push(byte),
            }
        }
        (body, false)
    }

    /// Hex string body after the opening `<`.
    fn take_hex_string(&mut self) -> (Vec<u8>, bool) {
        let mut digits = Vec::new();
        let mut closed = false;
        while let Some(byte) = self.peek() {
            self.pos += 1;
            if byte == b'>' {
                closed = true;
                break;
            }
            if let Some(value) = hex_value(byte) {
                digits.push(value);
            }
        }
        if digits.len() % 2 == 1 {
            digits.push(0);
        }
        let body = digits.chunks(2).map(|pair| (pair[0] << 4) | pair[1]).collect();
        (body, closed)
    }

    /// Skip binary inline image data following an `ID` operator, stopping in
    /// front of the matching `EI`.
    fn skip_inline_image_data(&mut self) {
        if matches!(self.peek(), Some(byte) if is_whitespace(byte)) {
            self.pos += 1;
        }
        let start = self.pos;
        let mut i = start;
        while i + 1 < self.data.len() {
            let preceded = i == start || is_whitespace(self.data[i - 1]);
            let followed = self
                .data
                .get(i + 2)
                .map_or(true, |&byte| !is_regular(byte));
            if preceded && followed && &self.data[i..i + 2] == b"EI" {
                self.pos = i;
                return;
            }
            i += 1;
        }
        self.pos = self.data.len();
    }

    fn push_string_tokens(&mut self, open: &str, close: &str, body: Vec<u8>, closed: bool) {
        self.pending.push_back(Token::delimiter(open));
        if !body.is_empty() {
            self.pending.push_back(Token::other(decode_text_string(&body)));
        }
        if closed {
            self.pending.push_back(Token::delimiter(close));
        }
    }

    fn lex_next(&mut self) {
        self.skip_whitespace_and_comments();
        let Some(byte) = self.peek() else { return };

        match byte {
            b'/' => {
                self.pos += 1;
                self.pending.push_back(Token::delimiter(NAME_DELIMITER));
                let name = self.take_name();
                if !name.is_empty() {
                    self.pending
                        .push_back(Token::name(String::from_utf8_lossy(&name).into_owned()));
                }
            }
            b'(' => {
                self.pos += 1;
                let (body, closed) = self.take_literal_string();
                self.push_string_tokens("(", ")", body, closed);
            }
            b'<' if self.peek_at(1) == Some(b'<') => {
                self.pos += 2;
                self.pending.push_back(Token::delimiter("<<"));
            }
            b'<' => {
                self.pos += 1;
                let (body, closed) = self.take_hex_string();
                self.push_string_tokens("<", ">", body, closed);
            }
            b'>' if self.peek_at(1) == Some(b'>') => {
                self.pos += 2;
                self.pending.push_back(Token::delimiter(">>"));
            }
            b'>' | b')' | b'[' | b']' | b'{' | b'}' => {
                self.pos += 1;
                self.pending
                    .push_back(Token::delimiter((byte as char).to_string()));
            }
            _ => {
                let word = self.take_regular();
                self.pending
                    .push_back(Token::other(String::from_utf8_lossy(word).into_owned()));
                if word == b"ID" {
                    self.skip_inline_image_data();
                }
            }
        }
    }
}

impl Iterator for ContentTokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.pending.is_empty() {
            self.lex_next();
        }
        self.pending.pop_front()
    }
}
