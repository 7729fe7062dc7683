//! String helpers over code-point sequences
//!
//! The sequence helpers are generic over any `T: PartialEq + Clone` element,
//! so they work on `&[char]` as well as raw `&[u32]` or byte slices.
//! Integer parsing operates on `&[char]`.

use crate::error::ParseError;

/// Split `s` on every non-overlapping occurrence of `delim`.
///
/// Empty segments are dropped. An empty delimiter never matches.
#[must_use]
pub fn split<T: PartialEq + Clone>(s: &[T], delim: &[T]) -> Vec<Vec<T>> {
    let mut segments = Vec::new();
    if delim.is_empty() {
        if !s.is_empty() {
            segments.push(s.to_vec());
        }
        return segments;
    }

    let mut start = 0;
    let mut i = 0;
    while i + delim.len() <= s.len() {
        if s[i..i + delim.len()] == *delim {
            if i > start {
                segments.push(s[start..i].to_vec());
            }
            i += delim.len();
            start = i;
        } else {
            i += 1;
        }
    }
    if start < s.len() {
        segments.push(s[start..].to_vec());
    }
    segments
}

/// True iff the first `prefix.len()` elements of `s` equal `prefix`.
#[must_use]
pub fn starts_with<T: PartialEq>(s: &[T], prefix: &[T]) -> bool {
    s.starts_with(prefix)
}

/// Replace every non-overlapping occurrence of `before` with `after`,
/// scanning left to right. Replacement text is never rescanned.
#[must_use]
pub fn replace_all<T: PartialEq + Clone>(s: &[T], before: &[T], after: &[T]) -> Vec<T> {
    if before.is_empty() {
        return s.to_vec();
    }

    let mut out = Vec::with_capacity(s.len());
    let mut i = 0;
    while let Some(pos) = find(s, before, i) {
        out.extend_from_slice(&s[i..pos]);
        out.extend_from_slice(after);
        i = pos + before.len();
    }
    out.extend_from_slice(&s[i..]);
    out
}

/// Collect every substring enclosed by `open` and `close`.
///
/// See [`extract_bracketed_filtered`] for the matching rules.
#[must_use]
pub fn extract_bracketed<T: PartialEq + Clone>(
    s: &[T],
    open: &[T],
    close: &[T],
) -> Vec<Vec<T>> {
    extract_bracketed_filtered(s, open, close, |_| true)
}

/// Collect substrings enclosed by `open` and `close` that `keep` accepts.
///
/// Scanning left to right, each `close` is paired with the nearest `open`
/// before it that lies after the previous pair. Runs of consecutive `open`
/// markers therefore only contribute their last one. A `close` at the very
/// start of `s` is skipped. Scanning stops at the first later `close` with
/// no such `open`; an `open` that is never closed is dropped. This is lossy
/// and only meant for well-formed input.
pub fn extract_bracketed_filtered<T, F>(
    s: &[T],
    open: &[T],
    close: &[T],
    mut keep: F,
) -> Vec<Vec<T>>
where
    T: PartialEq + Clone,
    F: FnMut(&[T]) -> bool,
{
    let mut found = Vec::new();
    if open.is_empty() || close.is_empty() {
        return found;
    }

    let mut cursor = 0;
    while let Some(close_at) = find(s, close, cursor.max(1)) {
        let Some(last_open) = close_at.checked_sub(open.len()) else {
            break;
        };
        let open_at = match rfind(s, open, last_open) {
            Some(at) if at >= cursor => at,
            _ => break,
        };

        let inner = &s[open_at + open.len()..close_at];
        if keep(inner) {
            found.push(inner.to_vec());
        }
        cursor = close_at + close.len();
    }
    found
}

/// Parse an integer, requiring the whole input to be consumed.
///
/// Follows `strtol` conventions: leading ASCII whitespace is skipped, an
/// optional sign is accepted, radix 0 detects `0x` (hex) and `0` (octal)
/// prefixes, and radix 16 accepts an optional `0x` prefix.
pub fn parse_int(s: &[char], radix: u32) -> Result<i32, ParseError> {
    let (value, consumed) = parse_int_prefix(s, radix)?;
    if consumed != s.len() {
        return Err(ParseError::TrailingInput { index: consumed });
    }
    Ok(value)
}

/// Parse the longest valid integer prefix of `s`.
///
/// Returns the value and the number of code points consumed, which is the
/// index of the first unparsed element.
pub fn parse_int_prefix(s: &[char], radix: u32) -> Result<(i32, usize), ParseError> {
    if radix == 1 || radix > 36 {
        return Err(ParseError::InvalidRadix(radix));
    }

    let mut i = 0;
    while s.get(i).copied().is_some_and(is_c_space) {
        i += 1;
    }

    let negative = match s.get(i) {
        Some('-') => {
            i += 1;
            true
        }
        Some('+') => {
            i += 1;
            false
        }
        _ => false,
    };

    let hex_prefix = s.get(i) == Some(&'0')
        && matches!(s.get(i + 1), Some('x' | 'X'))
        && s.get(i + 2).is_some_and(|c| c.is_ascii_hexdigit());

    let radix = match radix {
        0 | 16 if hex_prefix => {
            i += 2;
            16
        }
        0 if s.get(i) == Some(&'0') => 8,
        0 => 10,
        other => other,
    };

    let limit: i64 = if negative {
        -i64::from(i32::MIN)
    } else {
        i64::from(i32::MAX)
    };

    let digits_start = i;
    let mut value: i64 = 0;
    let mut overflowed = false;
    while let Some(digit) = s.get(i).and_then(|c| c.to_digit(radix)) {
        value = value * i64::from(radix) + i64::from(digit);
        if value > limit {
            overflowed = true;
            value = limit;
        }
        i += 1;
    }

    if i == digits_start {
        return Err(ParseError::NoDigits);
    }
    if overflowed {
        return Err(ParseError::OutOfRange);
    }

    let signed = if negative { -value } else { value };
    let value = i32::try_from(signed).map_err(|_| ParseError::OutOfRange)?;
    Ok((value, i))
}

// C `isspace` in the "C" locale
fn is_c_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

fn find<T: PartialEq>(haystack: &[T], needle: &[T], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| pos + from)
}

/// Last occurrence of `needle` starting at or before `last_start`.
fn rfind<T: PartialEq>(haystack: &[T], needle: &[T], last_start: usize) -> Option<usize> {
    let max_start = haystack.len().checked_sub(needle.len())?.min(last_start);
    (0..=max_start)
        .rev()
        .find(|&i| haystack[i..i + needle.len()] == *needle)
}
