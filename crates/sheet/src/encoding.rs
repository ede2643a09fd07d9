//! Declared text encodings for delimited input files
//!
//! Regional financial exports arrive in Big5 (`cp950`), broker and list
//! files in UTF-8 with a byte-order mark. The encoding is configuration:
//! nothing here sniffs the input.

use crate::error::{Result, SheetError};
use encoding_rs::{Encoding, BIG5, UTF_8};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A text encoding resolved from a configuration label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TextEncoding {
    label: String,
    encoding: &'static Encoding,
}

impl TextEncoding {
    /// Resolve a label such as `cp950`, `big5`, `utf-8` or `utf-8-sig`
    pub fn from_label(label: &str) -> Result<Self> {
        let normalized = label.trim().to_ascii_lowercase();
        let encoding = match normalized.as_str() {
            "cp950" | "ms950" | "windows-950" => Some(BIG5),
            "utf-8-sig" | "utf_8_sig" | "utf8-sig" => Some(UTF_8),
            other => Encoding::for_label(other.as_bytes()),
        };

        encoding
            .map(|encoding| TextEncoding {
                label: normalized.clone(),
                encoding,
            })
            .ok_or_else(|| SheetError::UnknownEncoding {
                label: label.to_string(),
            })
    }

    /// Big5 as exported by Traditional Chinese Windows locales
    #[must_use]
    pub fn cp950() -> Self {
        TextEncoding {
            label: "cp950".to_string(),
            encoding: BIG5,
        }
    }

    #[must_use]
    pub fn utf8() -> Self {
        TextEncoding {
            label: "utf-8".to_string(),
            encoding: UTF_8,
        }
    }

    /// The label this encoding was configured with
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Decode `bytes` strictly: malformed sequences are an error, never
    /// replacement characters.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>> {
        let body = if self.encoding == UTF_8 {
            bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
        } else {
            bytes
        };

        self.encoding
            .decode_without_bom_handling_and_without_replacement(body)
            .ok_or_else(|| SheetError::Decode {
                encoding: self.label.clone(),
            })
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self::utf8()
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

impl TryFrom<String> for TextEncoding {
    type Error = SheetError;

    fn try_from(label: String) -> Result<Self> {
        Self::from_label(&label)
    }
}

impl From<TextEncoding> for String {
    fn from(encoding: TextEncoding) -> Self {
        encoding.label
    }
}
