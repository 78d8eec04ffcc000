//! Transcoding to UTF-8 using `encoding_rs`.

use std::borrow::Cow;

use simdutf8::basic::from_utf8;

use crate::detection::Conversion;
use crate::registry::Charset;

/// Label of every [`crate::Encoded`] output.
pub const TARGET_ENCODING: &str = "UTF-8";

/// Check if the given bytes are valid UTF-8.
///
/// Uses SIMD-accelerated validation for performance.
pub fn is_utf8(data: &[u8]) -> bool {
    from_utf8(data).is_ok()
}

/// Check if the data starts with a UTF-8 BOM (Byte Order Mark).
///
/// The UTF-8 BOM is the byte sequence: EF BB BF
pub fn has_utf8_bom(data: &[u8]) -> bool {
    data.starts_with(&[0xEF, 0xBB, 0xBF])
}

/// Skip the UTF-8 BOM if present and return the remaining data.
pub fn skip_bom(data: &[u8]) -> &[u8] {
    if has_utf8_bom(data) { &data[3..] } else { data }
}

/// Convert `data`, read as `charset`, to UTF-8.
///
/// Never fails. Malformed input is decoded with replacement characters, and
/// charsets without a decoder have their bytes passed through unchanged.
/// A BOM matching `charset` is removed. For UTF-16 the BOM decides the byte
/// order, so a big-endian page declared as plain `UTF-16` still decodes.
pub fn transcode(data: &[u8], charset: Charset) -> (Cow<'_, [u8]>, Conversion) {
    let Some(codec) = charset.codec() else {
        log::debug!("no decoder for {charset}; relabeling {} bytes as UTF-8", data.len());
        return (Cow::Borrowed(data), Conversion::Relabeled);
    };

    if codec == encoding_rs::UTF_8 {
        let body = skip_bom(data);
        if is_utf8(body) {
            return (Cow::Borrowed(body), Conversion::Unchanged);
        }
    }

    let (decoded, had_errors) = if codec == encoding_rs::UTF_16LE || codec == encoding_rs::UTF_16BE {
        let (decoded, actual, had_errors) = codec.decode(data);
        if actual != codec {
            log::debug!("{charset} input carries a {} BOM", actual.name());
        }
        (decoded, had_errors)
    } else {
        codec.decode_with_bom_removal(data)
    };
    let conversion = if had_errors {
        log::debug!("malformed {charset} input; replaced invalid sequences");
        Conversion::Replaced
    } else {
        Conversion::Transcoded
    };

    let bytes = match decoded {
        Cow::Borrowed(text) => Cow::Borrowed(text.as_bytes()),
        Cow::Owned(text) => Cow::Owned(text.into_bytes()),
    };
    (bytes, conversion)
}
