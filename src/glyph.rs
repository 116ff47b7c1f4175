//! Glyph table and single-digit decoding.
//!
//! Every digit is drawn as a block of three rows, three characters each,
//! using only spaces, underscores and pipes.

use crate::error::{OcrError, Result};
use std::fmt;

/// Number of rows in a glyph (and in an entry).
pub const GLYPH_HEIGHT: usize = 3;

/// Number of characters per glyph row.
pub const GLYPH_WIDTH: usize = 3;

/// Canonical renderings of the digits 0 through 9, indexed by digit value.
pub static GLYPHS: [[&str; GLYPH_HEIGHT]; 10] = [
    [" _ ", "| |", "|_|"],
    ["   ", "  |", "  |"],
    [" _ ", " _|", "|_ "],
    [" _ ", " _|", " _|"],
    ["   ", "|_|", "  |"],
    [" _ ", "|_ ", " _|"],
    [" _ ", "|_ ", "|_|"],
    [" _ ", "  |", "  |"],
    [" _ ", "|_|", "|_|"],
    [" _ ", "|_|", " _|"],
];

/// Returns the canonical rendering of `digit`, or `None` above 9.
pub fn canonical(digit: u8) -> Option<&'static [&'static str; GLYPH_HEIGHT]> {
    GLYPHS.get(digit as usize)
}

/// Finds the digit whose canonical rendering matches `rows` exactly.
pub fn lookup<S: AsRef<str>>(rows: &[S]) -> Option<u8> {
    GLYPHS
        .iter()
        .position(|glyph| {
            glyph.len() == rows.len() && glyph.iter().zip(rows).all(|(g, r)| *g == r.as_ref())
        })
        .map(|idx| idx as u8)
}

/// A decoded digit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Digit {
    /// A recognized digit. Values above 9 render as unrecognized.
    Known(u8),
    /// No canonical glyph matched.
    Unrecognized,
}

impl Digit {
    /// Marker rendered for unrecognized digits.
    pub const UNRECOGNIZED: char = '?';

    /// Renders the digit as `'0'..='9'` or `'?'`.
    pub fn to_char(self) -> char {
        match self {
            Digit::Known(d) => char::from_digit(u32::from(d), 10).unwrap_or(Self::UNRECOGNIZED),
            Digit::Unrecognized => Self::UNRECOGNIZED,
        }
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// One 3x3 glyph block, validated on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    rows: [String; GLYPH_HEIGHT],
}

impl Glyph {
    /// Builds a glyph from its rows, checking height and width.
    ///
    /// Width is counted in characters.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        if rows.len() != GLYPH_HEIGHT {
            return Err(OcrError::InvalidGlyphHeight {
                expected: GLYPH_HEIGHT,
                actual: rows.len(),
            });
        }

        for (row, text) in rows.iter().enumerate() {
            let width = text.as_ref().chars().count();
            if width != GLYPH_WIDTH {
                return Err(OcrError::InvalidGlyphWidth {
                    row,
                    expected: GLYPH_WIDTH,
                    actual: width,
                });
            }
        }

        Ok(Glyph {
            rows: [
                rows[0].as_ref().to_string(),
                rows[1].as_ref().to_string(),
                rows[2].as_ref().to_string(),
            ],
        })
    }

    pub fn rows(&self) -> &[String; GLYPH_HEIGHT] {
        &self.rows
    }

    /// Exact match against the glyph table.
    pub fn decode(&self) -> Digit {
        lookup(&self.rows).map_or(Digit::Unrecognized, Digit::Known)
    }
}

/// Validates `rows` as a glyph and decodes it.
///
/// Wrong geometry is an error; an unknown pattern is [`Digit::Unrecognized`].
pub fn decode_glyph<S: AsRef<str>>(rows: &[S]) -> Result<Digit> {
    Glyph::from_rows(rows).map(|glyph| glyph.decode())
}
