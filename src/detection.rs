use std::borrow::Cow;
use std::fmt;

use crate::registry::Charset;

/// Where a guessed charset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The `Content-Type` header.
    Header,
    /// A `<meta>` element in the document.
    Meta,
    /// No usable declaration; the configured default.
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Header => write!(f, "header"),
            Source::Meta => write!(f, "meta"),
            Source::Default => write!(f, "default"),
        }
    }
}

/// Result of guessing a document's charset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// The charset to decode the document with.
    pub charset: Charset,
    /// Which signal produced `charset`.
    pub source: Source,
    /// Raw charset token from the headers, whether or not it was used.
    pub header_token: Option<String>,
    /// Raw charset token from the first declaring `<meta>` element. Only
    /// looked for when the header did not settle the charset.
    pub meta_token: Option<String>,
}

impl Detection {
    /// A detection that fell back to `charset` without seeing any tokens.
    pub const fn fallback(charset: Charset) -> Self {
        Self {
            charset,
            source: Source::Default,
            header_token: None,
            meta_token: None,
        }
    }
}

/// How [`Encoded`] output was produced from the input bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// The input was already valid UTF-8 and is passed through.
    Unchanged,
    /// The input was decoded from its charset without errors.
    Transcoded,
    /// Malformed sequences were replaced with U+FFFD while decoding.
    Replaced,
    /// No decoder exists for the charset; the bytes are relabeled as UTF-8
    /// as-is and may not be valid UTF-8.
    Relabeled,
}

/// A document converted to UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded<'a> {
    /// The output bytes, labeled UTF-8.
    pub bytes: Cow<'a, [u8]>,
    /// The charset the input was read as.
    pub source: Charset,
    /// How `bytes` was produced.
    pub conversion: Conversion,
}

impl Encoded<'_> {
    /// The label of the output bytes. Always `"UTF-8"`.
    pub const fn encoding(&self) -> &'static str {
        crate::encoding::TARGET_ENCODING
    }

    /// Whether the output bytes are valid UTF-8.
    ///
    /// Only relabeled output can fail this check.
    pub fn is_valid(&self) -> bool {
        crate::encoding::is_utf8(&self.bytes)
    }

    /// The output as text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        simdutf8::basic::from_utf8(&self.bytes).ok()
    }

    /// The output as text, replacing invalid sequences.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Take ownership of the output bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes.into_owned()
    }
}
