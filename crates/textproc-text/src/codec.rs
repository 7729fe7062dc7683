//! UTF-8 ⇄ UTF-32 conversion
//!
//! Decoded text is represented as `Vec<char>`: every element is a Unicode
//! scalar value, so a decoded sequence can always be re-encoded. Encoding
//! accepts raw `u32` values as well, in which case surrogates and values
//! above U+10FFFF are rejected.

use crate::error::{EncodingError, EncodingErrorKind};
use std::io::{self, Read};

/// Decode UTF-8 bytes into code points.
///
/// Fails on invalid bytes, overlong forms, encoded surrogates, values above
/// U+10FFFF and sequences truncated by the end of input. The error offset is
/// the byte position where the offending sequence starts.
pub fn decode_utf8(bytes: &[u8]) -> Result<Vec<char>, EncodingError> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.chars().collect()),
        Err(err) => {
            let offset = err.valid_up_to();
            let kind = match err.error_len() {
                None => EncodingErrorKind::Truncated,
                Some(_) => classify_sequence(&bytes[offset..]),
            };
            Err(EncodingError::new(kind, offset))
        }
    }
}

/// Decode a NUL-terminated buffer. Bytes after the first NUL are ignored.
pub fn decode_utf8_until_nul(bytes: &[u8]) -> Result<Vec<char>, EncodingError> {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    decode_utf8(&bytes[..end])
}

/// Read `reader` to end of stream and decode the result.
///
/// Malformed UTF-8 surfaces as [`io::ErrorKind::InvalidData`] wrapping the
/// [`EncodingError`].
pub fn read_code_points<R: Read>(mut reader: R) -> io::Result<Vec<char>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode_utf8(&bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Encode code points as UTF-8.
///
/// Accepts anything convertible to `u32`, so both `&[char]` and raw
/// `&[u32]` work. The error offset is the index of the rejected element.
pub fn encode_utf32<C>(code_points: &[C]) -> Result<Vec<u8>, EncodingError>
where
    C: Copy + Into<u32>,
{
    let mut out = Vec::with_capacity(code_points.len());
    let mut buf = [0u8; 4];
    for (index, &cp) in code_points.iter().enumerate() {
        let ch = to_scalar(cp.into(), index)?;
        out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
    }
    Ok(out)
}

/// Encode exactly one code point to its 1–4 byte UTF-8 form.
pub fn encode_single(code_point: u32) -> Result<Vec<u8>, EncodingError> {
    let ch = to_scalar(code_point, 0)?;
    let mut buf = [0u8; 4];
    Ok(ch.encode_utf8(&mut buf).as_bytes().to_vec())
}

fn to_scalar(value: u32, index: usize) -> Result<char, EncodingError> {
    char::from_u32(value).ok_or_else(|| {
        let kind = if (0xD800..=0xDFFF).contains(&value) {
            EncodingErrorKind::Surrogate
        } else {
            EncodingErrorKind::OutOfRange
        };
        EncodingError::new(kind, index)
    })
}

/// Name the reason a sequence rejected by the standard decoder is invalid.
fn classify_sequence(seq: &[u8]) -> EncodingErrorKind {
    match seq {
        [0xC0 | 0xC1, ..] => EncodingErrorKind::Overlong,
        [0xE0, 0x80..=0x9F, ..] => EncodingErrorKind::Overlong,
        [0xF0, 0x80..=0x8F, ..] => EncodingErrorKind::Overlong,
        [0xED, 0xA0..=0xBF, ..] => EncodingErrorKind::Surrogate,
        [0xF4, 0x90..=0xBF, ..] | [0xF5..=0xF7, ..] => EncodingErrorKind::OutOfRange,
        // A valid lead byte whose continuation bytes stop early.
        [0xC2..=0xF4, ..] => EncodingErrorKind::Truncated,
        _ => EncodingErrorKind::InvalidByte,
    }
}
