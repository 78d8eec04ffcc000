//! Integration tests for html-charset

use html_charset::{
    Conversion, Guesser, HeaderCase, Source, encode, encode_with_headers, encoding_loaded, guess,
    guess_with_headers, registry_names, resolve,
};
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

const PLAIN: &[u8] = b"<html><body><div>hi!</div></body></html>";
const GB18030_PAGE: &[u8] = include_bytes!("data/gb18030.html");

fn http_equiv(charset: &str) -> Vec<u8> {
    format!(
        r#"<html><head><meta http-equiv="content-type" content="text/html; charset={charset}"></head><body><div>hi!</div></body></html>"#
    )
    .into_bytes()
}

#[test]
fn test_guess_from_header_blob() {
    let headers = "Hello: world\nContent-Type: text/html; charset=LATIN1\nFoo: bar";
    assert_eq!(guess_with_headers(PLAIN, headers), "ISO-8859-1");
}

#[test]
fn test_guess_from_header_map() {
    let headers = HashMap::from([
        ("Hello", "world"),
        ("Content-Type", "text/html; charset=LATIN1"),
        ("Foo", "bar"),
    ]);
    assert_eq!(guess_with_headers(PLAIN, &headers), "ISO-8859-1");
}

#[test]
fn test_guess_from_meta_tag() {
    assert_eq!(guess(&http_equiv("LATIN1")), "ISO-8859-1");
}

#[test]
fn test_semicolon_after_header_charset() {
    let headers = "Hello: world\nContent-Type: text/html; charset=utf-8;\nFoo: bar";
    assert_eq!(guess_with_headers(PLAIN, headers), "UTF-8");
}

#[test]
fn test_semicolon_after_meta_charset() {
    assert_eq!(guess(&http_equiv("utf-8;")), "UTF-8");
}

#[test]
fn test_alias_translations() {
    assert_eq!(guess(&http_equiv("utf8;")), "UTF-8");
    assert_eq!(guess(&http_equiv("UTF8")), "UTF-8");
    assert_eq!(guess(&http_equiv("cp-1251;")), "CP1251");
    assert_eq!(guess(&http_equiv("WIN1251;")), "WINDOWS-1250");
    assert_eq!(guess(&http_equiv("GB2312;")), "GB18030");
}

#[test]
fn test_invalid_header_is_skipped() {
    let headers = "Hello: world\nContent-Type: text/html; charset=RU;\nFoo: bar";
    assert_eq!(guess_with_headers(&http_equiv("utf8;"), headers), "UTF-8");
    assert_eq!(guess_with_headers(b"<meta charset=utf8>", headers), "UTF-8");
}

#[test]
fn test_valid_header_beats_meta_tag() {
    let headers = "Content-Type: text/html; charset=koi8-r";
    let detection = Guesser::new().detect_with_headers(&http_equiv("gbk"), headers);
    assert_eq!(detection.charset, "KOI8-R");
    assert_eq!(detection.source, Source::Header);
}

#[test]
fn test_html5_meta_charset() {
    let html = br#"<html><head><meta charset="gbk" /></head><body><div>hi!</div></body></html>"#;
    assert_eq!(guess(html), "GBK");
}

#[test]
fn test_unquoted_uppercase_meta() {
    let html = br#"<html><head><META http-equiv=Content-Type content="text/html; charset=utf-8"></head><body><div>hi!</div></body></html>"#;
    assert_eq!(guess(html), "UTF-8");
}

#[test]
fn test_registry_passthrough() {
    assert_eq!(guess(&http_equiv("x-mac-roman;")), "X-MAC-ROMAN");
}

#[test]
fn test_empty_document() {
    assert_eq!(guess(b""), "UTF-8");
    assert_eq!(guess_with_headers(b"", "Content-Type: text/html; charset=gbk"), "UTF-8");

    let encoded = encode(b"");
    assert_eq!(encoded.encoding(), "UTF-8");
    assert!(encoded.bytes.is_empty());
}

#[test]
fn test_encode_correct_utf8_page() {
    let data = "<html><head><meta http-equiv='content-type' content='text/html; charset=utf8;'></head><body><div>hi!♥</div></body></html>";
    let encoded = encode(data.as_bytes());

    assert_eq!(encoded.source, "UTF-8");
    assert_eq!(encoded.encoding(), "UTF-8");
    assert_eq!(encoded.conversion, Conversion::Unchanged);
    assert_eq!(encoded.as_str(), Some(data));
}

#[test]
fn test_encode_incorrect_utf8_page() {
    let data: &[u8] = b"<html><head><meta http-equiv='content-type' content='text/html; charset=utf8;'></head><body><div>hi!\xc2</div></body></html>";
    assert_eq!(guess(data), "UTF-8");
    assert!(std::str::from_utf8(data).is_err());

    let encoded = encode(data);
    assert_eq!(encoded.encoding(), "UTF-8");
    assert_eq!(encoded.conversion, Conversion::Replaced);
    assert!(encoded.is_valid());
    assert!(encoded.as_str().unwrap().contains("hi!\u{FFFD}</div>"));
}

#[test]
fn test_encode_mac_roman_page() {
    let data: &[u8] = b"<html><head><meta http-equiv='content-type' content='text/html; charset=x-mac-roman;'></head><body><div>hi!\x8e</div></body></html>";
    assert_eq!(guess(data), "X-MAC-ROMAN");

    let encoded = encode(data);
    assert_eq!(encoded.encoding(), "UTF-8");
    assert!(encoded.is_valid());
    assert!(encoded.as_str().unwrap().contains("hi!é"));
}

#[test]
fn test_encode_unconvertible_charset_relabels() {
    let data: &[u8] = b"<html><head><meta charset=utf-7></head><body>+AGgAaQ-\xff</body></html>";
    assert_eq!(guess(data), "UTF-7");

    let encoded = encode(data);
    assert_eq!(encoded.encoding(), "UTF-8");
    assert_eq!(encoded.source, "UTF-7");
    assert_eq!(encoded.conversion, Conversion::Relabeled);
    assert_eq!(&encoded.bytes[..], data);
    assert!(!encoded.is_valid());
}

#[test]
fn test_gb18030_fixture() {
    assert!(encoding_loaded("GB18030"));
    assert_eq!(guess(GB18030_PAGE), "GB18030");

    let encoded = encode(GB18030_PAGE);
    assert_eq!(encoded.source, "GB18030");
    assert_eq!(encoded.encoding(), "UTF-8");
    assert_eq!(encoded.conversion, Conversion::Transcoded);
    let text = encoded.as_str().unwrap();
    assert!(text.contains("你好，世界"));
    assert!(text.contains("中文测试页面"));
}

#[test]
fn test_gb18030_fixture_with_empty_header_map() {
    let headers: HashMap<String, String> = HashMap::new();
    let encoded = encode_with_headers(GB18030_PAGE, &headers);
    assert_eq!(encoded.source, "GB18030");
}

#[test]
fn test_header_charset_drives_transcoding() {
    // "Привет" in Windows-1251, undeclared in the document
    let data: &[u8] = &[b'<', b'p', b'>', 0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2];
    let headers = vec![("Content-Type".to_string(), "text/html; charset=cp1251".to_string())];

    let encoded = encode_with_headers(data, &headers);
    assert_eq!(encoded.source, "CP1251");
    assert_eq!(encoded.as_str(), Some("<p>Привет"));
}

#[test]
fn test_utf16_header_with_big_endian_bom() {
    let data: &[u8] = &[0xFE, 0xFF, 0x00, b'<', 0x00, b'p', 0x00, b'>', 0x00, b'h', 0x00, b'i'];
    let encoded = encode_with_headers(data, "Content-Type: text/html; charset=UTF-16");

    assert_eq!(encoded.source, "UTF-16");
    assert_eq!(encoded.conversion, Conversion::Transcoded);
    assert_eq!(encoded.as_str(), Some("<p>hi"));
}

#[test]
fn test_commented_out_meta_is_skipped() {
    assert_eq!(guess(b"<!-- <meta charset=koi8-r> --><meta charset=gbk>"), "GBK");
}

#[test]
fn test_latin1_page_decodes_as_windows_1252() {
    let data: &[u8] = b"<meta charset=latin1><p>\x80 caf\xe9</p>";
    let encoded = encode(data);
    assert_eq!(encoded.source, "ISO-8859-1");
    assert_eq!(encoded.as_str(), Some("<meta charset=latin1><p>€ café</p>"));
}

#[test]
fn test_encoding_loaded_for_every_registry_name() {
    for name in registry_names() {
        assert!(encoding_loaded(name), "{name}");
        assert!(encoding_loaded(&name.to_ascii_uppercase()), "{name}");
        assert!(encoding_loaded(&name.to_ascii_lowercase()), "{name}");
    }
}

#[test]
fn test_encoding_loaded_case() {
    assert!(encoding_loaded("WINDOWS-1250"));
    assert!(encoding_loaded("windows-1250"));
    assert!(!encoding_loaded("_WHY"));
}

#[test]
fn test_resolved_tokens_are_loaded() {
    for token in ["utf8", "UTF8", "latin1", "cp-1251", "WIN1251", "GB2312", "gbk", "x-mac-roman"] {
        let charset = resolve(token).unwrap();
        assert!(encoding_loaded(charset.name()), "{token}");
        assert!(encoding_loaded(&charset.name().to_ascii_lowercase()), "{token}");
    }
}

#[test]
fn test_case_insensitive_headers() {
    let headers = HashMap::from([("content-type", "text/html; charset=big5")]);
    assert_eq!(guess_with_headers(PLAIN, &headers), "UTF-8");

    let mut guesser = Guesser::new();
    guesser.header_case(HeaderCase::Insensitive);
    assert_eq!(guesser.guess_with_headers(PLAIN, &headers), "BIG5");
}

#[test]
fn test_guess_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(GB18030_PAGE).unwrap();
    temp_file.flush().unwrap();

    let detection = Guesser::new().guess_path(temp_file.path()).unwrap();
    assert_eq!(detection.charset, "GB18030");
    assert_eq!(detection.source, Source::Meta);
    assert_eq!(detection.meta_token.as_deref(), Some("gb2312"));
}

#[test]
fn test_guess_missing_file() {
    let result = Guesser::new().guess_path("/nonexistent/page.html");
    assert!(matches!(result, Err(html_charset::GuessError::Io(_))));
}

#[test]
fn test_concurrent_guesses() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| guess(&http_equiv("GB2312")).name()))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), "GB18030");
    }
}
