//! Error types for text conversion and parsing

use std::fmt;
use thiserror::Error;

/// What was wrong with a byte sequence or code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingErrorKind {
    /// A byte that can never start or continue a UTF-8 sequence.
    InvalidByte,
    /// A multi-byte sequence cut off by the end of input.
    Truncated,
    /// A code point encoded with more bytes than necessary.
    Overlong,
    /// A UTF-16 surrogate (U+D800..=U+DFFF) where a scalar value is required.
    Surrogate,
    /// A value above U+10FFFF.
    OutOfRange,
}

impl EncodingErrorKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidByte => "invalid byte",
            Self::Truncated => "truncated sequence",
            Self::Overlong => "overlong encoding",
            Self::Surrogate => "surrogate code point",
            Self::OutOfRange => "code point out of range",
        }
    }
}

impl fmt::Display for EncodingErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Malformed or out-of-range text.
///
/// `offset` is a byte offset when decoding and a code-point index when
/// encoding.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Encoding error: {kind} at offset {offset}")]
pub struct EncodingError {
    pub kind: EncodingErrorKind,
    pub offset: usize,
}

impl EncodingError {
    #[must_use]
    pub const fn new(kind: EncodingErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

/// Unparsable numeric text.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid radix {0}: expected 0 or 2..=36")]
    InvalidRadix(u32),

    #[error("No digits found")]
    NoDigits,

    #[error("Unexpected trailing input at index {index}")]
    TrailingInput { index: usize },

    #[error("Value out of range for a 32-bit integer")]
    OutOfRange,
}
