//! Meta tag extraction.
//!
//! The document is scanned as raw bytes: the patterns are ASCII-only
//! (`(?-u)`), so they match tag structure regardless of what encoding the
//! rest of the page is in.

use regex::bytes::Regex;

use crate::headers::charset_param;

/// Pattern for a `<meta ...>` element, capturing its attribute text.
///
/// Comments are matched by the first branch and consumed whole, so a meta
/// element inside `<!-- ... -->` never matches. An unterminated comment runs
/// to the end of the input.
static META_TAG_PATTERN: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?is-u)<!--.*?(?:-->|\z)|<meta\b([^>]*)>").expect("Invalid meta tag pattern")
});

/// Pattern for one attribute: name, then an optional double-quoted,
/// single-quoted or bare value.
static ATTRIBUTE_PATTERN: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r#"(?i-u)([a-z_:][-a-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
        .expect("Invalid attribute pattern")
});

/// The charset declarations a single meta element can carry.
#[derive(Debug, Default)]
struct MetaAttributes<'a> {
    charset: Option<&'a [u8]>,
    http_equiv: Option<&'a [u8]>,
    content: Option<&'a [u8]>,
}

impl<'a> MetaAttributes<'a> {
    fn parse(text: &'a [u8]) -> Self {
        let mut attrs = MetaAttributes::default();
        for caps in ATTRIBUTE_PATTERN.captures_iter(text) {
            let name = &caps[1];
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or(&b""[..], |m| m.as_bytes());

            // First occurrence of an attribute wins.
            let slot = if name.eq_ignore_ascii_case(b"charset") {
                &mut attrs.charset
            } else if name.eq_ignore_ascii_case(b"http-equiv") {
                &mut attrs.http_equiv
            } else if name.eq_ignore_ascii_case(b"content") {
                &mut attrs.content
            } else {
                continue;
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        attrs
    }

    /// The charset token this element declares, if any.
    fn charset(&self) -> Option<&'a str> {
        if let Some(raw) = self.charset {
            let token = std::str::from_utf8(raw).ok()?.trim().trim_end_matches('/').trim();
            return (!token.is_empty()).then_some(token);
        }

        let equiv = self.http_equiv?;
        if !equiv.trim_ascii().eq_ignore_ascii_case(b"content-type") {
            return None;
        }
        charset_param(std::str::from_utf8(self.content?).ok()?)
    }
}

/// Find the first `<meta>` element declaring a charset and return the token.
///
/// Both `<meta charset="...">` and
/// `<meta http-equiv="Content-Type" content="...; charset=...">` are
/// recognized; whichever appears first in the document wins.
pub fn meta_charset(document: &[u8]) -> Option<&str> {
    META_TAG_PATTERN
        .captures_iter(document)
        .filter_map(|caps| caps.get(1))
        .find_map(|attrs| MetaAttributes::parse(attrs.as_bytes()).charset())
}
