//! The `Guesser` builder and its guess/encode methods.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::alias::resolve;
use crate::detection::{Detection, Encoded, Source};
use crate::encoding::transcode;
use crate::error::{GuessError, Result};
use crate::headers::{HeaderCase, HeaderSource, header_charset};
use crate::meta::meta_charset;
use crate::registry::{self, Charset};

/// How many leading bytes of a document are searched for `<meta>` tags by
/// default.
pub const DEFAULT_PRESCAN_BYTES: usize = 2500;

/// Charset guesser for HTML documents.
///
/// The `Content-Type` header wins when it names a known charset; otherwise
/// the first `<meta>` declaration in the document is used; otherwise the
/// default encoding. Unknown or malformed declarations are skipped, never
/// reported as errors.
///
/// # Example
///
/// ```
/// use html_charset::Guesser;
///
/// let mut guesser = Guesser::new();
/// guesser.prescan_bytes(Some(1024));
///
/// let html = br#"<html><head><meta charset="gbk"></head></html>"#;
/// assert_eq!(guesser.guess(html).name(), "GBK");
///
/// let headers = "Content-Type: text/html; charset=LATIN1";
/// assert_eq!(guesser.guess_with_headers(html, headers).name(), "ISO-8859-1");
/// ```
#[derive(Debug, Clone)]
pub struct Guesser {
    /// Charset used when nothing usable is declared.
    default_encoding: Charset,
    /// Meta tag search window; `None` searches the whole document.
    prescan_bytes: Option<usize>,
    /// How the `Content-Type` header name is matched.
    header_case: HeaderCase,
}

impl Default for Guesser {
    fn default() -> Self {
        Self::new()
    }
}

impl Guesser {
    /// Create a new Guesser with default settings.
    pub fn new() -> Self {
        Self {
            default_encoding: registry::utf_8(),
            prescan_bytes: Some(DEFAULT_PRESCAN_BYTES),
            header_case: HeaderCase::Exact,
        }
    }

    /// Set the charset returned when no declaration is usable.
    ///
    /// Accepts the same spellings as a declaration would (`utf8`, `latin1`,
    /// ...). Fails if the name is not a known charset.
    pub fn default_encoding(&mut self, name: &str) -> Result<&mut Self> {
        self.default_encoding =
            resolve(name).ok_or_else(|| GuessError::UnknownEncoding(name.to_string()))?;
        Ok(self)
    }

    /// Limit the number of leading bytes searched for `<meta>` tags.
    pub fn prescan_bytes(&mut self, limit: Option<usize>) -> &mut Self {
        self.prescan_bytes = limit;
        self
    }

    /// Set how the `Content-Type` header name is matched.
    pub fn header_case(&mut self, case: HeaderCase) -> &mut Self {
        self.header_case = case;
        self
    }

    /// Guess the charset of `document` from its `<meta>` tags.
    pub fn detect(&self, document: &[u8]) -> Detection {
        self.detect_inner::<str>(document, None)
    }

    /// Guess the charset of `document` from `headers` and its `<meta>` tags.
    pub fn detect_with_headers<H>(&self, document: &[u8], headers: &H) -> Detection
    where
        H: HeaderSource + ?Sized,
    {
        self.detect_inner(document, Some(headers))
    }

    /// Like [`Guesser::detect`], returning only the charset.
    pub fn guess(&self, document: &[u8]) -> Charset {
        self.detect(document).charset
    }

    /// Like [`Guesser::detect_with_headers`], returning only the charset.
    pub fn guess_with_headers<H>(&self, document: &[u8], headers: &H) -> Charset
    where
        H: HeaderSource + ?Sized,
    {
        self.detect_with_headers(document, headers).charset
    }

    /// Guess the charset of `document` and convert it to UTF-8.
    pub fn encode<'a>(&self, document: &'a [u8]) -> Encoded<'a> {
        self.encode_inner::<str>(document, None)
    }

    /// Guess the charset of `document` using `headers` and convert it to
    /// UTF-8.
    pub fn encode_with_headers<'a, H>(&self, document: &'a [u8], headers: &H) -> Encoded<'a>
    where
        H: HeaderSource + ?Sized,
    {
        self.encode_inner(document, Some(headers))
    }

    /// Guess the charset of the HTML file at `path`.
    ///
    /// Only the prescan window is read from disk.
    pub fn guess_path<P: AsRef<Path>>(&self, path: P) -> Result<Detection> {
        let file = File::open(path.as_ref())?;
        self.guess_reader(io::BufReader::new(file))
    }

    /// Guess the charset of HTML read from `reader`.
    pub fn guess_reader<R: Read>(&self, reader: R) -> Result<Detection> {
        let data = self.read_sample(reader)?;
        Ok(self.detect(&data))
    }

    fn read_sample<R: Read>(&self, mut reader: R) -> io::Result<Vec<u8>> {
        let mut data = Vec::new();
        match self.prescan_bytes {
            Some(limit) => {
                reader.take(limit as u64).read_to_end(&mut data)?;
            }
            None => {
                reader.read_to_end(&mut data)?;
            }
        }
        Ok(data)
    }

    fn prescan<'a>(&self, document: &'a [u8]) -> &'a [u8] {
        match self.prescan_bytes {
            Some(limit) if limit < document.len() => &document[..limit],
            _ => document,
        }
    }

    fn detect_inner<H>(&self, document: &[u8], headers: Option<&H>) -> Detection
    where
        H: HeaderSource + ?Sized,
    {
        let mut detection = Detection::fallback(self.default_encoding);
        if document.is_empty() {
            log::debug!("empty document; using default {}", self.default_encoding);
            return detection;
        }

        if let Some(token) = headers.and_then(|h| header_charset(h, self.header_case)) {
            detection.header_token = Some(token.to_string());
            if let Some(charset) = resolve(token) {
                log::debug!("header charset {token:?} resolved to {charset}");
                detection.charset = charset;
                detection.source = Source::Header;
                return detection;
            }
            log::debug!("ignoring unknown header charset {token:?}");
        }

        if let Some(token) = meta_charset(self.prescan(document)) {
            detection.meta_token = Some(token.to_string());
            if let Some(charset) = resolve(token) {
                log::debug!("meta charset {token:?} resolved to {charset}");
                detection.charset = charset;
                detection.source = Source::Meta;
                return detection;
            }
            log::debug!("ignoring unknown meta charset {token:?}");
        }

        log::debug!("no usable charset declaration; using default {}", self.default_encoding);
        detection
    }

    fn encode_inner<'a, H>(&self, document: &'a [u8], headers: Option<&H>) -> Encoded<'a>
    where
        H: HeaderSource + ?Sized,
    {
        let source = self.detect_inner(document, headers).charset;
        let (bytes, conversion) = transcode(document, source);
        Encoded {
            bytes,
            source,
            conversion,
        }
    }
}
