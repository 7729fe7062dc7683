//! Integration tests for the text layer through the `textproc` facade
//!
//! Tests cover:
//! - UTF-8 decoding and re-encoding, including 4-byte sequences
//! - Display width classification
//! - split / starts_with / replace_all / bracket extraction
//! - strict and prefix integer parsing

use textproc::strops::{
    extract_bracketed, extract_bracketed_filtered, parse_int, parse_int_prefix, replace_all,
    split, starts_with,
};
use textproc::{
    DisplayWidth, EncodingErrorKind, ParseError, decode_utf8, decode_utf8_until_nul,
    encode_single, encode_utf32, read_code_points, str_width, width,
};

fn cps(s: &str) -> Vec<char> {
    s.chars().collect()
}

fn strings(parts: Vec<Vec<char>>) -> Vec<String> {
    parts.into_iter().map(|p| p.into_iter().collect()).collect()
}

// ============================================================================
// Codec
// ============================================================================

#[test]
fn test_decode_then_encode_restores_bytes() {
    let samples = ["", "hello", "naïve café", "あいうえお", "ｱｲｳ", "𠀋𩸽 and 😀"];
    for sample in samples {
        let decoded = decode_utf8(sample.as_bytes()).unwrap();
        assert_eq!(decoded.len(), sample.chars().count(), "{sample}");
        assert_eq!(encode_utf32(&decoded).unwrap(), sample.as_bytes(), "{sample}");
    }
}

#[test]
fn test_encode_raw_scalar_values() {
    let values: Vec<u32> = vec![0x41, 0x3042, 0x1000B];
    assert_eq!(encode_utf32(&values).unwrap(), "Aあ\u{1000B}".as_bytes());
}

#[test]
fn test_encode_rejects_surrogate_and_out_of_range() {
    let err = encode_utf32(&[0x41u32, 0xDC00]).unwrap_err();
    assert_eq!(err.kind, EncodingErrorKind::Surrogate);
    assert_eq!(err.offset, 1);

    let err = encode_utf32(&[0x11_0000u32]).unwrap_err();
    assert_eq!(err.kind, EncodingErrorKind::OutOfRange);
    assert_eq!(err.offset, 0);
}

#[test]
fn test_encode_single_lengths() {
    assert_eq!(encode_single(0x7F).unwrap().len(), 1);
    assert_eq!(encode_single(0x7FF).unwrap().len(), 2);
    assert_eq!(encode_single(0xFFFF).unwrap().len(), 3);
    assert_eq!(encode_single(0x10FFFF).unwrap().len(), 4);
}

#[test]
fn test_decode_errors_report_offset() {
    let cases: [(&[u8], EncodingErrorKind, usize); 5] = [
        (b"ab\xFF", EncodingErrorKind::InvalidByte, 2),
        (b"a\xE3\x81", EncodingErrorKind::Truncated, 1),
        (b"\xC0\xAF", EncodingErrorKind::Overlong, 0),
        (b"x\xED\xA0\x80", EncodingErrorKind::Surrogate, 1),
        (b"\xF4\x90\x80\x80", EncodingErrorKind::OutOfRange, 0),
    ];

    for (bytes, kind, offset) in cases {
        let err = decode_utf8(bytes).unwrap_err();
        assert_eq!(err.kind, kind, "{bytes:?}");
        assert_eq!(err.offset, offset, "{bytes:?}");
    }
}

#[test]
fn test_decode_until_nul_and_reader() {
    assert_eq!(decode_utf8_until_nul(b"ab\0cd").unwrap(), cps("ab"));
    assert_eq!(read_code_points(&b"line\n"[..]).unwrap(), cps("line\n"));

    let err = read_code_points(&b"\xFF"[..]).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}

// ============================================================================
// Width
// ============================================================================

#[test]
fn test_width_rule() {
    assert_eq!(width(0x41u32), 1);
    assert_eq!(width(0x3042u32), 2);
    assert_eq!(width(0xFF71u32), 1);
    assert_eq!(width(0x1000Bu32), 2);
    assert_eq!(width('é'), 1);
    assert_eq!(width(0x100u32), 2);
}

#[test]
fn test_width_halfwidth_block_edges() {
    assert_eq!(DisplayWidth::of(0xFF60u32), DisplayWidth::Wide);
    assert_eq!(DisplayWidth::of(0xFF61u32), DisplayWidth::Narrow);
    assert_eq!(DisplayWidth::of(0xFF9Fu32), DisplayWidth::Narrow);
    assert_eq!(DisplayWidth::of(0xFFA0u32), DisplayWidth::Wide);
}

#[test]
fn test_str_width_mixed() {
    assert_eq!(str_width(&cps("abc")), 3);
    assert_eq!(str_width(&cps("日本語")), 6);
    assert_eq!(str_width(&cps("ｶﾀｶﾅ")), 4);
    assert_eq!(str_width::<char>(&[]), 0);
}

// ============================================================================
// String operations
// ============================================================================

#[test]
fn test_split_drops_empty_segments() {
    let parts = split(&cps("abcde\n\nXYZ\n\n\n\nPQ"), &cps("\n\n"));
    assert_eq!(strings(parts), vec!["abcde", "XYZ", "PQ"]);
}

#[test]
fn test_split_without_match() {
    assert_eq!(strings(split(&cps("abc"), &cps(","))), vec!["abc"]);
    assert!(split(&cps(""), &cps(",")).is_empty());
    assert!(split(&cps(",,,"), &cps(",")).is_empty());
}

#[test]
fn test_starts_with() {
    let s = cps("abcde\n\n...");
    assert!(starts_with(&s, &cps("abcde\n\n")));
    assert!(!starts_with(&s, &cps("be\n\n")));
    assert!(starts_with(&s, &[]));
    assert!(!starts_with(&cps("ab"), &cps("abc")));
}

#[test]
fn test_replace_all() {
    let out = replace_all(&cps("a-b-c"), &cps("-"), &cps("--"));
    assert_eq!(out.into_iter().collect::<String>(), "a--b--c");

    let out = replace_all(&cps("aaaa"), &cps("aa"), &cps("b"));
    assert_eq!(out.into_iter().collect::<String>(), "bb");

    let out = replace_all(&cps("xyz"), &cps("q"), &cps("r"));
    assert_eq!(out.into_iter().collect::<String>(), "xyz");
}

#[test]
fn test_extract_bracketed() {
    let found = extract_bracketed(&cps("a[b]c[d]"), &cps("["), &cps("]"));
    assert_eq!(strings(found), vec!["b", "d"]);

    assert!(extract_bracketed(&cps("a[b c"), &cps("["), &cps("]")).is_empty());
}

#[test]
fn test_extract_bracketed_multi_char_markers() {
    let found = extract_bracketed(&cps("{{x}} and {{ y }}"), &cps("{{"), &cps("}}"));
    assert_eq!(strings(found), vec!["x", " y "]);
}

#[test]
fn test_extract_bracketed_filtered() {
    let found = extract_bracketed_filtered(&cps("<1><22><333>"), &cps("<"), &cps(">"), |inner| {
        inner.len() > 1
    });
    assert_eq!(strings(found), vec!["22", "333"]);
}

#[test]
fn test_parse_int() {
    assert_eq!(parse_int(&cps("42"), 10), Ok(42));
    assert_eq!(parse_int(&cps("  -17"), 10), Ok(-17));
    assert_eq!(parse_int(&cps("ff"), 16), Ok(255));
    assert_eq!(parse_int(&cps("0x1F"), 0), Ok(31));
    assert_eq!(parse_int(&cps("017"), 0), Ok(15));
    assert_eq!(parse_int(&cps("-2147483648"), 10), Ok(i32::MIN));
}

#[test]
fn test_parse_int_errors() {
    assert_eq!(parse_int(&cps(""), 10), Err(ParseError::NoDigits));
    assert_eq!(parse_int(&cps("abc"), 10), Err(ParseError::NoDigits));
    assert_eq!(
        parse_int(&cps("12ab"), 10),
        Err(ParseError::TrailingInput { index: 2 })
    );
    assert_eq!(parse_int(&cps("2147483648"), 10), Err(ParseError::OutOfRange));
    assert_eq!(parse_int(&cps("1"), 1), Err(ParseError::InvalidRadix(1)));
    assert_eq!(parse_int(&cps("1"), 37), Err(ParseError::InvalidRadix(37)));
}

#[test]
fn test_parse_int_prefix() {
    assert_eq!(parse_int_prefix(&cps("123abc"), 10), Ok((123, 3)));
    assert_eq!(parse_int_prefix(&cps(" +7 rest"), 10), Ok((7, 3)));
    assert_eq!(parse_int_prefix(&cps("zz"), 36), Ok((1295, 2)));
}
