//! The encoding registry: every charset name this crate recognizes.
//!
//! Each entry pairs a canonical name and its aliases with the `encoding_rs`
//! codec that can decode it. Some entries are nominal: the name is valid and
//! reported by [`crate::guess`], but no decoder exists for it, so
//! [`crate::encode`] relabels the bytes instead of transcoding them.

use std::fmt;
use std::sync::LazyLock;

use encoding_rs::Encoding;
use foldhash::HashMap;

/// A registry entry as written in the table below.
struct Entry {
    name: &'static str,
    aliases: &'static [&'static str],
    /// WHATWG label handed to `encoding_rs`, or `None` for nominal entries.
    codec: Option<&'static str>,
}

const fn entry(
    name: &'static str,
    aliases: &'static [&'static str],
    codec: Option<&'static str>,
) -> Entry {
    Entry {
        name,
        aliases,
        codec,
    }
}

// Names and aliases are stored uppercase; lookups uppercase their input.
static ENTRIES: &[Entry] = &[
    entry("UTF-8", &["CP65001", "UTF8-MAC", "UTF-8-MAC", "UTF-8-HFS"], Some("utf-8")),
    entry("US-ASCII", &["ASCII", "ANSI_X3.4-1968", "646"], Some("us-ascii")),
    entry("ASCII-8BIT", &["BINARY"], None),
    entry("ISO-8859-1", &["ISO8859-1"], Some("iso-8859-1")),
    entry("ISO-8859-2", &["ISO8859-2"], Some("iso-8859-2")),
    entry("ISO-8859-3", &["ISO8859-3"], Some("iso-8859-3")),
    entry("ISO-8859-4", &["ISO8859-4"], Some("iso-8859-4")),
    entry("ISO-8859-5", &["ISO8859-5"], Some("iso-8859-5")),
    entry("ISO-8859-6", &["ISO8859-6"], Some("iso-8859-6")),
    entry("ISO-8859-7", &["ISO8859-7"], Some("iso-8859-7")),
    entry("ISO-8859-8", &["ISO8859-8"], Some("iso-8859-8")),
    entry("ISO-8859-8-I", &[], Some("iso-8859-8-i")),
    entry("ISO-8859-9", &["ISO8859-9"], Some("iso-8859-9")),
    entry("ISO-8859-10", &["ISO8859-10"], Some("iso-8859-10")),
    entry("ISO-8859-11", &["ISO8859-11"], Some("iso-8859-11")),
    entry("ISO-8859-13", &["ISO8859-13"], Some("iso-8859-13")),
    entry("ISO-8859-14", &["ISO8859-14"], Some("iso-8859-14")),
    entry("ISO-8859-15", &["ISO8859-15"], Some("iso-8859-15")),
    entry("ISO-8859-16", &["ISO8859-16"], Some("iso-8859-16")),
    entry("WINDOWS-1250", &["CP1250"], Some("windows-1250")),
    entry("WINDOWS-1251", &["CP1251"], Some("windows-1251")),
    entry("WINDOWS-1252", &["CP1252"], Some("windows-1252")),
    entry("WINDOWS-1253", &["CP1253"], Some("windows-1253")),
    entry("WINDOWS-1254", &["CP1254"], Some("windows-1254")),
    entry("WINDOWS-1255", &["CP1255"], Some("windows-1255")),
    entry("WINDOWS-1256", &["CP1256"], Some("windows-1256")),
    entry("WINDOWS-1257", &["CP1257"], Some("windows-1257")),
    entry("WINDOWS-1258", &["CP1258"], Some("windows-1258")),
    entry("WINDOWS-874", &["CP874"], Some("windows-874")),
    entry("TIS-620", &[], Some("tis-620")),
    entry("IBM437", &["CP437"], None),
    entry("IBM850", &["CP850"], None),
    entry("IBM852", &["CP852"], None),
    entry("IBM855", &["CP855"], None),
    entry("IBM866", &["CP866"], Some("ibm866")),
    entry("KOI8-R", &["CP878"], Some("koi8-r")),
    entry("KOI8-U", &[], Some("koi8-u")),
    entry("X-MAC-ROMAN", &["MACROMAN", "MACINTOSH"], Some("macintosh")),
    entry("X-MAC-CYRILLIC", &["MACCYRILLIC"], Some("x-mac-cyrillic")),
    entry("MACCENTEURO", &[], None),
    entry("MACCROATIAN", &[], None),
    entry("MACGREEK", &[], None),
    entry("SHIFT_JIS", &[], Some("shift_jis")),
    entry("WINDOWS-31J", &["CP932", "CSWINDOWS31J", "SJIS", "PCK"], Some("shift_jis")),
    entry("EUC-JP", &["EUCJP"], Some("euc-jp")),
    entry("EUCJP-MS", &["EUC-JP-MS"], Some("euc-jp")),
    entry("CP51932", &[], Some("euc-jp")),
    entry("ISO-2022-JP", &["ISO2022-JP"], Some("iso-2022-jp")),
    entry("EUC-KR", &["EUCKR"], Some("euc-kr")),
    entry("CP949", &[], Some("euc-kr")),
    entry("ISO-2022-KR", &[], None),
    entry("BIG5", &[], Some("big5")),
    entry("CP950", &[], Some("big5")),
    entry("BIG5-HKSCS", &["BIG5-HKSCS:2008"], Some("big5-hkscs")),
    entry("EUC-TW", &["EUCTW"], None),
    entry("GBK", &["CP936"], Some("gbk")),
    entry("GB2312", &["EUC-CN", "EUCCN"], Some("gb2312")),
    entry("GB18030", &[], Some("gb18030")),
    entry("UTF-16", &[], Some("utf-16")),
    entry("UTF-16BE", &["UCS-2BE"], Some("utf-16be")),
    entry("UTF-16LE", &[], Some("utf-16le")),
    entry("UTF-32", &[], None),
    entry("UTF-32BE", &["UCS-4BE"], None),
    entry("UTF-32LE", &["UCS-4LE"], None),
    entry("UTF-7", &["CP65000"], None),
    entry("ARMSCII-8", &[], None),
];

/// A recognized charset: the registry spelling it was found under, plus the
/// decoder for it when one exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charset {
    name: &'static str,
    codec: Option<&'static Encoding>,
}

impl Charset {
    /// The uppercase registry name, e.g. `"UTF-8"` or `"CP1251"`.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The `encoding_rs` decoder, or `None` for nominal encodings.
    ///
    /// Decoders follow the WHATWG Encoding Standard, so several names share
    /// a superset decoder: `ISO-8859-1` (what `LATIN1` resolves to) and
    /// `US-ASCII` decode as windows-1252 (byte `0x80` becomes `€`, not
    /// U+0080), `ISO-8859-9` as
    /// windows-1254, `ISO-8859-11` and `TIS-620` as windows-874, and `GB2312`
    /// as GBK.
    pub const fn codec(&self) -> Option<&'static Encoding> {
        self.codec
    }

    /// Whether bytes in this charset can be transcoded to UTF-8.
    pub const fn is_convertible(&self) -> bool {
        self.codec.is_some()
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl AsRef<str> for Charset {
    fn as_ref(&self) -> &str {
        self.name
    }
}

impl PartialEq<str> for Charset {
    fn eq(&self, other: &str) -> bool {
        self.name == other
    }
}

impl PartialEq<&str> for Charset {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}

static REGISTRY: LazyLock<HashMap<&'static str, Charset>> = LazyLock::new(|| {
    let mut map = HashMap::default();
    for entry in ENTRIES {
        let codec = entry.codec.and_then(|label| Encoding::for_label(label.as_bytes()));
        for &name in std::iter::once(&entry.name).chain(entry.aliases) {
            map.insert(name, Charset { name, codec });
        }
    }
    map
});

/// Look up a charset by name or alias, ignoring ASCII case and surrounding
/// whitespace.
pub fn lookup(name: &str) -> Option<Charset> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    REGISTRY.get(name.to_ascii_uppercase().as_str()).copied()
}

/// The UTF-8 charset, used as the default guess.
pub(crate) fn utf_8() -> Charset {
    Charset {
        name: "UTF-8",
        codec: Some(encoding_rs::UTF_8),
    }
}

/// Whether `name` is a registered charset name or alias, in any case.
pub fn is_loaded(name: &str) -> bool {
    lookup(name).is_some()
}

/// Every registered name and alias, in table order.
pub fn names() -> impl Iterator<Item = &'static str> {
    ENTRIES
        .iter()
        .flat_map(|entry| std::iter::once(entry.name).chain(entry.aliases.iter().copied()))
}
