//! Entry segmentation and account number decoding.
//!
//! An entry is three rows of 27 characters holding nine glyphs side by
//! side, most significant digit first.

use crate::checksum::{classify, Status};
use crate::error::{OcrError, Result};
use crate::glyph::{Digit, Glyph, GLYPH_HEIGHT, GLYPH_WIDTH};
use std::fmt;

/// Number of digits in an account number.
pub const ACCOUNT_NUMBER_LENGTH: usize = 9;

/// Width of every entry row.
pub const ENTRY_WIDTH: usize = ACCOUNT_NUMBER_LENGTH * GLYPH_WIDTH;

/// Checks that `entry` is exactly 3 rows of 27 characters.
pub fn validate_entry<S: AsRef<str>>(entry: &[S]) -> Result<()> {
    if entry.len() != GLYPH_HEIGHT {
        return Err(OcrError::InvalidEntryHeight {
            expected: GLYPH_HEIGHT,
            actual: entry.len(),
        });
    }

    for (row, text) in entry.iter().enumerate() {
        let width = text.as_ref().chars().count();
        if width != ENTRY_WIDTH {
            return Err(OcrError::InvalidEntryWidth {
                row,
                expected: ENTRY_WIDTH,
                actual: width,
            });
        }
    }

    Ok(())
}

/// Splits an entry into its nine glyphs, left to right.
///
/// Only geometry is checked here; glyph contents are not inspected.
pub fn segment<S: AsRef<str>>(entry: &[S]) -> Result<Vec<Glyph>> {
    validate_entry(entry)?;

    let rows: Vec<Vec<char>> = entry.iter().map(|r| r.as_ref().chars().collect()).collect();

    (0..ACCOUNT_NUMBER_LENGTH)
        .map(|pos| {
            let cols = pos * GLYPH_WIDTH..(pos + 1) * GLYPH_WIDTH;
            let chunk: Vec<String> = rows
                .iter()
                .map(|row| row[cols.clone()].iter().collect())
                .collect();
            Glyph::from_rows(&chunk)
        })
        .collect()
}

/// A decoded nine-character account number (`0`-`9` or `?`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountNumber(String);

impl AccountNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if any position failed to decode.
    pub fn is_illegible(&self) -> bool {
        self.0.contains(Digit::UNRECOGNIZED)
    }

    pub fn status(&self) -> Status {
        classify(&self.0)
    }
}

impl FromIterator<Digit> for AccountNumber {
    fn from_iter<I: IntoIterator<Item = Digit>>(iter: I) -> Self {
        AccountNumber(iter.into_iter().map(Digit::to_char).collect())
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decodes an entry into its account number.
///
/// Fails only on bad geometry; unknown glyphs become `?`.
pub fn decode_account<S: AsRef<str>>(entry: &[S]) -> Result<AccountNumber> {
    Ok(segment(entry)?.iter().map(Glyph::decode).collect())
}
