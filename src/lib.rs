//! html-charset: guess the character encoding of HTML documents
//!
//! Reads the two explicit declarations a page can carry, the HTTP
//! `Content-Type` header and `<meta>` elements, and turns whatever spelling
//! they use into a charset name from a fixed registry. Optionally converts
//! the document to UTF-8 with `encoding_rs`.
//!
//! # Quick Start
//!
//! ```
//! use html_charset::{encode, guess, guess_with_headers};
//!
//! let html = br#"<html><head><meta http-equiv="content-type" content="text/html; charset=GB2312"></head></html>"#;
//! assert_eq!(guess(html).name(), "GB18030");
//!
//! let headers = "Hello: world\nContent-Type: text/html; charset=LATIN1\nFoo: bar";
//! assert_eq!(guess_with_headers(html, headers).name(), "ISO-8859-1");
//!
//! let encoded = encode(b"<meta charset=utf8>hi!");
//! assert_eq!(encoded.encoding(), "UTF-8");
//! assert_eq!(encoded.as_str(), Some("<meta charset=utf8>hi!"));
//! ```
//!
//! # Precedence
//!
//! 1. An empty document gets the default (`UTF-8`).
//! 2. A `Content-Type` header whose charset is known wins.
//! 3. Otherwise the first `<meta charset>` or
//!    `<meta http-equiv="Content-Type">` declaration is used, if known.
//! 4. Otherwise the default.
//!
//! None of this can fail: unknown charsets are skipped, malformed bytes are
//! replaced during conversion, and charsets without a decoder are relabeled
//! as UTF-8 unchanged.
//!
//! Conversion follows the WHATWG Encoding Standard as implemented by
//! `encoding_rs`, so some legacy names decode with a superset: `ISO-8859-1`
//! is read as windows-1252, for example. See [`Charset::codec`].
//!
//! Headers may be given as a raw `"Name: Value"` blob or as a map; see
//! [`HeaderSource`].

mod alias;
mod detection;
mod encoding;
mod error;
mod guesser;
mod headers;
#[cfg(feature = "http")]
pub mod http;
mod meta;
mod registry;

pub use detection::{Conversion, Detection, Encoded, Source};
pub use error::{GuessError, Result};
pub use guesser::{DEFAULT_PRESCAN_BYTES, Guesser};
pub use headers::{HeaderCase, HeaderSource};
pub use registry::Charset;

// Re-export for advanced usage
pub use alias::resolve;
pub use encoding::{TARGET_ENCODING, is_utf8, transcode};
pub use headers::{charset_param, header_charset};
pub use meta::meta_charset;
pub use registry::{lookup, names as registry_names};

/// Guess the charset of `document` from its `<meta>` tags.
pub fn guess(document: &[u8]) -> Charset {
    Guesser::new().guess(document)
}

/// Guess the charset of `document` from `headers` and its `<meta>` tags.
pub fn guess_with_headers<H>(document: &[u8], headers: &H) -> Charset
where
    H: HeaderSource + ?Sized,
{
    Guesser::new().guess_with_headers(document, headers)
}

/// Guess the charset of `document` and convert it to UTF-8.
pub fn encode(document: &[u8]) -> Encoded<'_> {
    Guesser::new().encode(document)
}

/// Guess the charset of `document` using `headers` and convert it to UTF-8.
pub fn encode_with_headers<'a, H>(document: &'a [u8], headers: &H) -> Encoded<'a>
where
    H: HeaderSource + ?Sized,
{
    Guesser::new().encode_with_headers(document, headers)
}

/// Whether `name` is a known charset name or alias, in any letter case.
///
/// Only registry names count; alias-table spellings such as `utf8` are not
/// names in their own right.
pub fn encoding_loaded(name: &str) -> bool {
    registry::is_loaded(name)
}
