//! Utilities for decoding and encoding PDF text strings

use lopdf::{Object, StringFormat};

const UTF16BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// Decode the bytes of a PDF string object into text.
///
/// Strings starting with a UTF-16BE byte order mark are decoded as UTF-16,
/// everything else as UTF-8 with lossy replacement.
pub fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(body) = bytes.strip_prefix(&UTF16BE_BOM) {
        let units: Vec<u16> = body
            .chunks(2)
            .map(|pair| match pair {
                [hi, lo] => u16::from_be_bytes([*hi, *lo]),
                [hi] => u16::from_be_bytes([*hi, 0]),
                _ => 0,
            })
            .collect();
        return String::from_utf16_lossy(&units);
    }
    String::from_utf8_lossy(bytes).into_owned()
}

/// Encode text as a PDF string object suitable for the Info dictionary.
pub fn encode_text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = UTF16BE_BOM.to_vec();
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Extract text from a string or name object.
pub fn object_text(object: &Object) -> Option<String> {
    match object {
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}
