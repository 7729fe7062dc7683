//! Terminal display width
//!
//! A coarse East Asian width heuristic: anything above U+00FF is treated as
//! double width, except the halfwidth katakana block. This is intentionally
//! not the Unicode East Asian Width property; callers rely on this exact rule.

use std::ops::RangeInclusive;

/// Halfwidth katakana, always a single column.
pub const HALFWIDTH_KATAKANA: RangeInclusive<u32> = 0xFF61..=0xFF9F;

/// Number of terminal columns a code point occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayWidth {
    Narrow,
    Wide,
}

impl DisplayWidth {
    /// Classify a code point.
    #[must_use]
    pub fn of(code_point: impl Into<u32>) -> Self {
        let value = code_point.into();
        if HALFWIDTH_KATAKANA.contains(&value) {
            Self::Narrow
        } else if value > 0xFF {
            Self::Wide
        } else {
            Self::Narrow
        }
    }

    #[must_use]
    pub const fn columns(self) -> usize {
        match self {
            Self::Narrow => 1,
            Self::Wide => 2,
        }
    }
}

/// Columns occupied by a single code point: 1 or 2.
#[must_use]
pub fn width(code_point: impl Into<u32>) -> usize {
    DisplayWidth::of(code_point).columns()
}

/// Total columns occupied by a code-point sequence.
#[must_use]
pub fn str_width<C>(code_points: &[C]) -> usize
where
    C: Copy + Into<u32>,
{
    code_points.iter().map(|&cp| width(cp)).sum()
}
