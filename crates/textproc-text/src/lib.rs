//! Text layer for textproc
//!
//! - [`codec`]: UTF-8 ⇄ UTF-32 conversion with strict validation
//! - [`width`]: terminal display width of code points
//! - [`strops`]: split, prefix, replace, bracket extraction and integer parsing

pub mod codec;
pub mod error;
pub mod strops;
pub mod width;

pub use codec::{decode_utf8, decode_utf8_until_nul, encode_single, encode_utf32, read_code_points};
pub use error::{EncodingError, EncodingErrorKind, ParseError};
pub use strops::{
    extract_bracketed, extract_bracketed_filtered, parse_int, parse_int_prefix, replace_all,
    split, starts_with,
};
pub use width::{DisplayWidth, str_width, width};
