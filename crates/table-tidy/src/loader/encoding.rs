//! Text encodings the loader understands.

use crate::error::{CleaningError, Result};
use std::fmt;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Encoding used to turn raw bytes into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Strict UTF-8. A leading byte-order mark is dropped.
    Utf8,
    /// ISO-8859-1. Every byte maps to the code point of the same value.
    Latin1,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin-1",
        }
    }

    /// Decode `bytes` into an owned string.
    ///
    /// Latin-1 decoding cannot fail.
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        match self {
            Self::Utf8 => {
                let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                std::str::from_utf8(bytes)
                    .map(str::to_string)
                    .map_err(|e| CleaningError::Encoding {
                        encoding: self.as_str(),
                        message: e.to_string(),
                    })
            }
            Self::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
