//! Text decoding for delimited files.

use pricewise_traits::ReadError;

/// Byte-order mark stripped from the start of UTF-8 text.
const BOM: char = '\u{feff}';

/// A text encoding a delimited file may be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8, with an optional byte-order mark.
    Utf8,
    /// ISO-8859-1: every byte maps to the code point of the same value.
    Latin1,
    /// Windows code page 1252.
    Windows1252,
}

impl TextEncoding {
    /// Conventional label of the encoding.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin-1",
            Self::Windows1252 => "windows-1252",
        }
    }

    /// Decode raw file bytes.
    ///
    /// # Errors
    /// Returns `ReadError::Encoding` if the bytes are not valid in this encoding.
    pub fn decode(&self, bytes: &[u8]) -> Result<String, ReadError> {
        let invalid = || ReadError::Encoding { encoding: self.label() };
        match self {
            Self::Utf8 => {
                let text = std::str::from_utf8(bytes).map_err(|_| invalid())?;
                Ok(text.strip_prefix(BOM).unwrap_or(text).to_string())
            }
            Self::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Self::Windows1252 => bytes.iter().map(|&b| cp1252_char(b).ok_or_else(invalid)).collect(),
        }
    }
}

/// Code point for a windows-1252 byte. Five bytes in 0x80..0xA0 are undefined.
const fn cp1252_char(byte: u8) -> Option<char> {
    let c = match byte {
        0x80 => '\u{20AC}',
        0x82 => '\u{201A}',
        0x83 => '\u{0192}',
        0x84 => '\u{201E}',
        0x85 => '\u{2026}',
        0x86 => '\u{2020}',
        0x87 => '\u{2021}',
        0x88 => '\u{02C6}',
        0x89 => '\u{2030}',
        0x8A => '\u{0160}',
        0x8B => '\u{2039}',
        0x8C => '\u{0152}',
        0x8E => '\u{017D}',
        0x91 => '\u{2018}',
        0x92 => '\u{2019}',
        0x93 => '\u{201C}',
        0x94 => '\u{201D}',
        0x95 => '\u{2022}',
        0x96 => '\u{2013}',
        0x97 => '\u{2014}',
        0x98 => '\u{02DC}',
        0x99 => '\u{2122}',
        0x9A => '\u{0161}',
        0x9B => '\u{203A}',
        0x9C => '\u{0153}',
        0x9E => '\u{017E}',
        0x9F => '\u{0178}',
        0x81 | 0x8D | 0x8F | 0x90 | 0x9D => return None,
        other => other as char,
    };
    Some(c)
}
