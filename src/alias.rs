//! Charset alias table.
//!
//! Maps the colloquial or malformed charset spellings found in real pages
//! onto registry names. Keys are compared after uppercasing and dropping
//! `-` and `_`, so `cp-1251`, `CP_1251` and `cp1251` are the same key.

use crate::registry::{self, Charset};

/// `(normalized key, registry name)`.
///
/// `WIN1251` maps to `WINDOWS-1250`, not `WINDOWS-1251`. Pages in the wild
/// depend on this pairing, so it is kept as a fixed entry.
static ALIASES: &[(&str, &str)] = &[
    ("UTF8", "UTF-8"),
    ("DEFAULT", "UTF-8"),
    ("UNICODE", "UTF-8"),
    ("CP1251", "CP1251"),
    ("LATIN1", "ISO-8859-1"),
    ("WIN1251", "WINDOWS-1250"),
    ("GB2312", "GB18030"),
    ("GB231280", "GB18030"),
];

fn normalize(token: &str) -> String {
    token
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Resolve a raw charset token to a registered charset.
///
/// Tries the alias table first, then the registry itself. Returns `None` for
/// tokens neither knows about.
pub fn resolve(token: &str) -> Option<Charset> {
    let token = token.trim().trim_matches(|c| c == '"' || c == '\'').trim();
    if token.is_empty() {
        return None;
    }

    let key = normalize(token);
    if let Some((_, target)) = ALIASES.iter().find(|(alias, _)| *alias == key) {
        return registry::lookup(target);
    }

    registry::lookup(token)
}

/// The registry names the alias table can produce.
#[cfg(test)]
fn targets() -> impl Iterator<Item = &'static str> {
    ALIASES.iter().map(|(_, target)| *target)
}
