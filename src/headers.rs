//! Header extraction: find the `charset` parameter of a `Content-Type` header.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

const CONTENT_TYPE: &str = "Content-Type";

/// How header names are matched against `Content-Type`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderCase {
    /// Only the exact spelling `Content-Type` matches.
    #[default]
    Exact,
    /// Any ASCII case matches, as HTTP header names normally do.
    Insensitive,
}

impl HeaderCase {
    fn matches(self, name: &str) -> bool {
        match self {
            HeaderCase::Exact => name == CONTENT_TYPE,
            HeaderCase::Insensitive => name.eq_ignore_ascii_case(CONTENT_TYPE),
        }
    }
}

/// Something headers can be read from.
///
/// Implemented for raw header blobs (`"Name: Value"` lines) and for
/// name-to-value maps and pair lists.
pub trait HeaderSource {
    /// Values of every `Content-Type` header, in source order.
    fn content_types(&self, case: HeaderCase) -> Vec<&str>;
}

impl HeaderSource for str {
    fn content_types(&self, case: HeaderCase) -> Vec<&str> {
        self.lines()
            .filter_map(|line| line.split_once(':'))
            .filter(|(name, _)| case.matches(name))
            .map(|(_, value)| value.trim())
            .collect()
    }
}

impl HeaderSource for String {
    fn content_types(&self, case: HeaderCase) -> Vec<&str> {
        self.as_str().content_types(case)
    }
}

impl<K, V, S> HeaderSource for HashMap<K, V, S>
where
    K: AsRef<str>,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn content_types(&self, case: HeaderCase) -> Vec<&str> {
        match case {
            // Iteration order of a hash map is arbitrary; an exact key has
            // at most one value anyway.
            HeaderCase::Exact => self
                .iter()
                .find(|&(name, _)| as_str(name) == CONTENT_TYPE)
                .map(|(_, value)| as_str(value).trim())
                .into_iter()
                .collect(),
            HeaderCase::Insensitive => pairs(self.iter(), case),
        }
    }
}

impl<K, V> HeaderSource for BTreeMap<K, V>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn content_types(&self, case: HeaderCase) -> Vec<&str> {
        pairs(self.iter(), case)
    }
}

impl<K, V> HeaderSource for [(K, V)]
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn content_types(&self, case: HeaderCase) -> Vec<&str> {
        pairs(self.iter().map(|(k, v)| (k, v)), case)
    }
}

impl<K, V> HeaderSource for Vec<(K, V)>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn content_types(&self, case: HeaderCase) -> Vec<&str> {
        self.as_slice().content_types(case)
    }
}

fn pairs<'a, K, V>(iter: impl Iterator<Item = (&'a K, &'a V)>, case: HeaderCase) -> Vec<&'a str>
where
    K: AsRef<str> + 'a,
    V: AsRef<str> + 'a,
{
    iter.filter(|&(name, _)| case.matches(as_str(name)))
        .map(|(_, value)| as_str(value).trim())
        .collect()
}

fn as_str<T: AsRef<str> + ?Sized>(value: &T) -> &str {
    value.as_ref()
}

/// Extract the `charset=` parameter from a `Content-Type` style value.
///
/// The parameter name is matched case-insensitively. The value runs to the
/// next `;` (or the end), is trimmed, and loses one layer of quotes. Returns
/// `None` when there is no parameter or its value is empty.
pub fn charset_param(value: &str) -> Option<&str> {
    const NEEDLE: &[u8] = b"charset";

    let bytes = value.as_bytes();
    let mut from = 0;
    while let Some(offset) = bytes[from..]
        .windows(NEEDLE.len())
        .position(|w| w.eq_ignore_ascii_case(NEEDLE))
    {
        let start = from + offset + NEEDLE.len();
        from = start;

        let rest = value[start..].trim_start();
        let Some(rest) = rest.strip_prefix('=') else {
            continue;
        };
        let end = rest.find(';').unwrap_or(rest.len());
        let token = rest[..end]
            .trim()
            .trim_matches(|c| c == '"' || c == '\'')
            .trim();
        return (!token.is_empty()).then_some(token);
    }
    None
}

/// The charset token carried by the first `Content-Type` header that has one.
pub fn header_charset<H>(headers: &H, case: HeaderCase) -> Option<&str>
where
    H: HeaderSource + ?Sized,
{
    headers
        .content_types(case)
        .into_iter()
        .find_map(charset_param)
}
