//! Byte input decoding.
//!
//! Pages saved from legacy sites are often not UTF-8. Before extraction the
//! bytes are decoded using, in order: a byte order mark, a `charset=`
//! declaration in a `<meta>` tag within the first 1024 bytes, then UTF-8.

use std::borrow::Cow;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;
use tracing::trace;

/// Bytes examined for a `<meta>` declaration.
const PRESCAN_LIMIT: usize = 1024;

/// Both `<meta charset=x>` and `<meta http-equiv=... content="...; charset=x">`.
#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\b[^>]*?charset\s*=\s*["']?\s*([a-z0-9_:.\-]+)"#).expect("valid regex")
});

/// Where the chosen encoding came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingSource {
    ByteOrderMark,
    MetaDeclaration,
    Default,
}

/// Decoded document text.
#[derive(Debug, Clone)]
pub struct Decoded<'a> {
    pub text: Cow<'a, str>,
    pub encoding: &'static Encoding,
    pub source: EncodingSource,
    /// Whether malformed sequences were replaced with U+FFFD.
    pub had_errors: bool,
}

/// Pick the encoding for `bytes`.
#[must_use]
pub fn detect_encoding(bytes: &[u8]) -> (&'static Encoding, EncodingSource) {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return (encoding, EncodingSource::ByteOrderMark);
    }

    let head = &bytes[..bytes.len().min(PRESCAN_LIMIT)];
    let declared = META_CHARSET
        .captures(head)
        .and_then(|caps| caps.get(1))
        .and_then(|label| Encoding::for_label(label.as_bytes()));

    match declared {
        // A UTF-16 label in an ASCII-compatible prescan is a lie; browsers use UTF-8.
        Some(encoding) => (encoding.output_encoding(), EncodingSource::MetaDeclaration),
        None => (UTF_8, EncodingSource::Default),
    }
}

/// Decode `bytes` to text, replacing malformed sequences.
#[must_use]
pub fn decode_document(bytes: &[u8]) -> Decoded<'_> {
    let (encoding, source) = detect_encoding(bytes);
    let (text, had_errors) = if source == EncodingSource::ByteOrderMark {
        let (text, _, had_errors) = encoding.decode(bytes);
        (text, had_errors)
    } else {
        encoding.decode_without_bom_handling(bytes)
    };
    trace!(encoding = encoding.name(), ?source, had_errors, "decoded byte input");

    Decoded { text, encoding, source, had_errors }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_charset_latin1() {
        let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><title>Caf\xE9</title></html>";
        let decoded = decode_document(html);
        assert_eq!(decoded.encoding.name(), "windows-1252");
        assert_eq!(decoded.source, EncodingSource::MetaDeclaration);
        assert!(decoded.text.contains("Café"));
        assert!(!decoded.had_errors);
    }

    #[test]
    fn test_http_equiv_declaration() {
        let html = br#"<META HTTP-EQUIV="Content-Type" CONTENT="text/html; CHARSET=iso-8859-2">"#;
        let (encoding, source) = detect_encoding(html);
        assert_eq!(encoding.name(), "ISO-8859-2");
        assert_eq!(source, EncodingSource::MetaDeclaration);
    }

    #[test]
    fn test_polish_legacy_title() {
        // "Łódź" in ISO-8859-2.
        let html = b"<meta charset=iso-8859-2><title>\xA3\xF3d\xBC</title>";
        assert!(decode_document(html).text.contains("Łódź"));
    }

    #[test]
    fn test_bom_overrides_meta() {
        let mut html = vec![0xEF, 0xBB, 0xBF];
        html.extend_from_slice("<meta charset=windows-1252><title>Żaba</title>".as_bytes());
        let decoded = decode_document(&html);
        assert_eq!(decoded.source, EncodingSource::ByteOrderMark);
        assert!(decoded.text.starts_with("<meta"));
        assert!(decoded.text.contains("Żaba"));
    }

    #[test]
    fn test_utf16_label_falls_back_to_utf8() {
        let (encoding, _) = detect_encoding(b"<meta charset=utf-16le>");
        assert_eq!(encoding, UTF_8);
    }

    #[test]
    fn test_declaration_beyond_prescan_is_ignored() {
        let mut html = vec![b' '; PRESCAN_LIMIT];
        html.extend_from_slice(b"<meta charset=windows-1252>");
        assert_eq!(detect_encoding(&html), (UTF_8, EncodingSource::Default));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let decoded = decode_document(b"<title>bad \xFF byte</title>");
        assert!(decoded.had_errors);
        assert!(decoded.text.contains('\u{FFFD}'));
        assert!(decoded.text.contains("byte"));
    }
}
