//! Byte Order Mark (BOM) handling for XML parts.
//!
//! OOXML parts are almost always UTF-8, but the packaging conventions allow
//! UTF-16 as well. The tokenizer only consumes UTF-8, so parts are sniffed and
//! transcoded here before parsing.

use crate::ooxml::error::{OoxmlError, Result};
use encoding_rs::{UTF_16BE, UTF_16LE};
use std::borrow::Cow;

/// Supported BOM encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BomKind {
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl BomKind {
    /// Returns the byte representation of the BOM.
    #[inline]
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            BomKind::Utf8 => &UTF8_BOM,
            BomKind::Utf16Le => &UTF16_LE_BOM,
            BomKind::Utf16Be => &UTF16_BE_BOM,
        }
    }

    /// Returns the length in bytes of the BOM.
    #[inline]
    #[allow(clippy::len_without_is_empty)] // No need to check for empty BOMs
    pub const fn len(&self) -> usize {
        self.as_bytes().len()
    }
}

/// UTF-8 BOM bytes.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
/// UTF-16 little-endian BOM bytes.
pub const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
/// UTF-16 big-endian BOM bytes.
pub const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// Detect the BOM at the start of `bytes`, if any.
pub fn detect_bom(bytes: &[u8]) -> Option<BomKind> {
    if bytes.starts_with(&UTF8_BOM) {
        Some(BomKind::Utf8)
    } else if bytes.starts_with(&UTF16_LE_BOM) {
        Some(BomKind::Utf16Le)
    } else if bytes.starts_with(&UTF16_BE_BOM) {
        Some(BomKind::Utf16Be)
    } else {
        None
    }
}

/// Decode an XML part to UTF-8 text, honoring a leading BOM.
///
/// UTF-8 input (with or without BOM) is borrowed; UTF-16 input is transcoded.
pub fn decode_xml_part(bytes: &[u8]) -> Result<Cow<'_, str>> {
    let (encoding, body) = match detect_bom(bytes) {
        Some(BomKind::Utf8) => (None, &bytes[UTF8_BOM.len()..]),
        Some(BomKind::Utf16Le) => (Some(UTF_16LE), &bytes[UTF16_LE_BOM.len()..]),
        Some(BomKind::Utf16Be) => (Some(UTF_16BE), &bytes[UTF16_BE_BOM.len()..]),
        None => (None, bytes),
    };

    match encoding {
        None => std::str::from_utf8(body)
            .map(Cow::Borrowed)
            .map_err(|e| OoxmlError::Encoding(e.to_string())),
        Some(encoding) => {
            let (text, had_errors) = encoding.decode_without_bom_handling(body);
            if had_errors {
                return Err(OoxmlError::Encoding(format!(
                    "Malformed {} sequence in XML part",
                    encoding.name()
                )));
            }
            Ok(text)
        },
    }
}
