//! Property-based tests for the text layer
//!
//! ## Configuration
//!
//! - `PROPTEST_CASES`: Number of test cases per property (default: 64)
//! - `PROPTEST_MAX_SHRINK_ITERS`: Max shrinking iterations on failure (default: 1000)
//!
//! ```bash
//! PROPTEST_CASES=512 cargo test --test property_based_tests
//! ```

use proptest::prelude::*;
use std::env;
use textproc::strops::{extract_bracketed, parse_int, parse_int_prefix, replace_all, split};
use textproc::{DisplayWidth, decode_utf8, encode_utf32, width};

const DEFAULT_PROPTEST_CASES: u32 = 64;
const DEFAULT_MAX_SHRINK_ITERS: u32 = 1000;

/// Creates a ProptestConfig that respects environment variables.
fn proptest_config() -> ProptestConfig {
    let cases = env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(DEFAULT_PROPTEST_CASES);

    let max_shrink_iters = env::var("PROPTEST_MAX_SHRINK_ITERS")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(DEFAULT_MAX_SHRINK_ITERS);

    ProptestConfig {
        cases,
        max_shrink_iters,
        ..ProptestConfig::default()
    }
}

/// Short sequences over a tiny alphabet so delimiters actually occur.
fn small_text() -> impl Strategy<Value = Vec<char>> {
    prop::collection::vec(prop::sample::select(vec!['a', 'b', ',']), 0..40)
}

fn small_needle() -> impl Strategy<Value = Vec<char>> {
    prop::collection::vec(prop::sample::select(vec!['a', 'b', ',']), 1..3)
}

proptest! {
    #![proptest_config(proptest_config())]

    // ========================================================================
    // Codec
    // ========================================================================

    #[test]
    fn prop_valid_utf8_round_trips(text in any::<String>()) {
        let decoded = decode_utf8(text.as_bytes()).unwrap();
        prop_assert_eq!(encode_utf32(&decoded).unwrap(), text.as_bytes());
    }

    #[test]
    fn prop_code_points_round_trip(chars in prop::collection::vec(any::<char>(), 0..64)) {
        let encoded = encode_utf32(&chars).unwrap();
        prop_assert_eq!(decode_utf8(&encoded).unwrap(), chars);
    }

    #[test]
    fn prop_decode_error_offset_is_valid_prefix(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        match decode_utf8(&bytes) {
            Ok(decoded) => prop_assert_eq!(encode_utf32(&decoded).unwrap(), bytes),
            Err(err) => {
                prop_assert!(err.offset < bytes.len());
                prop_assert!(std::str::from_utf8(&bytes[..err.offset]).is_ok());
            }
        }
    }

    // ========================================================================
    // Width
    // ========================================================================

    #[test]
    fn prop_width_is_one_or_two(value in 0u32..=0x10FFFF) {
        let columns = width(value);
        let expected = if (0xFF61..=0xFF9F).contains(&value) || value <= 0xFF { 1 } else { 2 };
        prop_assert_eq!(columns, expected);
        prop_assert_eq!(DisplayWidth::of(value).columns(), columns);
    }

    // ========================================================================
    // String operations
    // ========================================================================

    #[test]
    fn prop_split_segments_are_clean(s in small_text(), delim in small_needle()) {
        for segment in split(&s, &delim) {
            prop_assert!(!segment.is_empty());
            prop_assert!(!segment.windows(delim.len()).any(|w| w == delim.as_slice()));
        }
    }

    #[test]
    fn prop_split_preserves_content_without_delimiter(s in small_text()) {
        let parts = split(&s, &['x']);
        if s.is_empty() {
            prop_assert!(parts.is_empty());
        } else {
            prop_assert_eq!(parts, vec![s]);
        }
    }

    #[test]
    fn prop_replace_with_self_is_identity(s in small_text(), needle in small_needle()) {
        prop_assert_eq!(replace_all(&s, &needle, &needle), s);
    }

    #[test]
    fn prop_replace_removes_every_occurrence(s in small_text()) {
        // Replacing a single element cannot create a new match.
        let out = replace_all(&s, &[','], &['-', '-']);
        prop_assert!(!out.contains(&','));
        prop_assert_eq!(out.len(), s.len() + s.iter().filter(|&&c| c == ',').count());
    }

    #[test]
    fn prop_extract_bracketed_recovers_contents(
        parts in prop::collection::vec(("[a-z ]{0,6}", "[a-z ]{0,6}"), 0..6)
    ) {
        let mut text = String::new();
        for (filler, inner) in &parts {
            text.push_str(filler);
            text.push('[');
            text.push_str(inner);
            text.push(']');
        }
        let text: Vec<char> = text.chars().collect();

        let found: Vec<String> = extract_bracketed(&text, &['['], &[']'])
            .into_iter()
            .map(|p| p.into_iter().collect())
            .collect();
        let expected: Vec<String> = parts.into_iter().map(|(_, inner)| inner).collect();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn prop_parse_int_round_trips_decimal(n in any::<i32>()) {
        let text: Vec<char> = n.to_string().chars().collect();
        prop_assert_eq!(parse_int(&text, 10), Ok(n));
        prop_assert_eq!(parse_int(&text, 0), Ok(n));
    }

    #[test]
    fn prop_parse_int_round_trips_hex(n in 0i32..=i32::MAX) {
        let text: Vec<char> = format!("{n:x}").chars().collect();
        prop_assert_eq!(parse_int(&text, 16), Ok(n));

        let prefixed: Vec<char> = format!("0x{n:X}").chars().collect();
        prop_assert_eq!(parse_int(&prefixed, 0), Ok(n));
    }

    #[test]
    fn prop_parse_int_prefix_stops_at_suffix(n in any::<i32>(), suffix in "[g-z ]{0,5}") {
        let digits = n.to_string();
        let text: Vec<char> = format!("{digits}{suffix}").chars().collect();
        prop_assert_eq!(parse_int_prefix(&text, 10), Ok((n, digits.chars().count())));
    }
}
