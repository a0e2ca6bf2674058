//! Text encodings tried when decoding delimited files.

use std::fmt;

use encoding_rs::{UTF_16BE, UTF_16LE, WINDOWS_1252};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A candidate text encoding for delimited uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
    Iso8859_1,
    Cp1252,
    Utf16,
    Utf32,
}

/// Encodings in the order they are attempted.
pub const ENCODING_FALLBACK_ORDER: [TextEncoding; 6] = [
    TextEncoding::Utf8,
    TextEncoding::Latin1,
    TextEncoding::Iso8859_1,
    TextEncoding::Cp1252,
    TextEncoding::Utf16,
    TextEncoding::Utf32,
];

impl TextEncoding {
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin1",
            Self::Iso8859_1 => "iso-8859-1",
            Self::Cp1252 => "cp1252",
            Self::Utf16 => "utf-16",
            Self::Utf32 => "utf-32",
        }
    }

    /// Decodes the whole input, returning None on any malformed sequence.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                std::str::from_utf8(body).ok().map(str::to_string)
            }
            // Both labels name the same byte-to-code-point mapping.
            Self::Latin1 | Self::Iso8859_1 => {
                Some(encoding_rs::mem::decode_latin1(bytes).into_owned())
            }
            Self::Cp1252 => WINDOWS_1252
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned()),
            Self::Utf16 => decode_utf16(bytes),
            Self::Utf32 => decode_utf32(bytes),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// UTF-16 honoring a byte order mark, little endian otherwise.
fn decode_utf16(bytes: &[u8]) -> Option<String> {
    let (encoding, body) = if let Some(rest) = bytes.strip_prefix(b"\xFF\xFE") {
        (UTF_16LE, rest)
    } else if let Some(rest) = bytes.strip_prefix(b"\xFE\xFF") {
        (UTF_16BE, rest)
    } else {
        (UTF_16LE, bytes)
    };
    if body.len() % 2 != 0 {
        return None;
    }
    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(|text| text.into_owned())
}

/// UTF-32 honoring a byte order mark, little endian otherwise.
///
/// encoding_rs has no UTF-32 decoder, so code units are assembled directly.
fn decode_utf32(bytes: &[u8]) -> Option<String> {
    let (big_endian, body) = if let Some(rest) = bytes.strip_prefix(b"\xFF\xFE\x00\x00") {
        (false, rest)
    } else if let Some(rest) = bytes.strip_prefix(b"\x00\x00\xFE\xFF") {
        (true, rest)
    } else {
        (false, bytes)
    };
    if body.len() % 4 != 0 {
        return None;
    }
    body.chunks_exact(4)
        .map(|unit| {
            let raw = [unit[0], unit[1], unit[2], unit[3]];
            let code = if big_endian {
                u32::from_be_bytes(raw)
            } else {
                u32::from_le_bytes(raw)
            };
            char::from_u32(code)
        })
        .collect()
}
