//! Error types for the account number decoder.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for decoder operations
pub type Result<T> = std::result::Result<T, OcrError>;

/// Errors that can occur while decoding account numbers.
///
/// Unrecognized glyphs are not errors: they decode to `?` and mark the
/// account number as illegible.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to open, read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Entry does not have the expected number of rows
    #[error("Invalid account number entry: entry must be {expected} lines, not {actual}")]
    InvalidEntryHeight { expected: usize, actual: usize },

    /// Entry row does not have the expected width
    #[error(
        "Invalid account number entry: entries must be {expected} characters wide, not {actual} (row {row})"
    )]
    InvalidEntryWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Glyph does not have the expected number of rows
    #[error("Invalid character: characters must be {expected} lines, not {actual}")]
    InvalidGlyphHeight { expected: usize, actual: usize },

    /// Glyph row does not have the expected width
    #[error("Invalid character: characters must be {expected} characters wide, not {actual} (row {row})")]
    InvalidGlyphWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Output file would replace the source it is generated from
    #[error("Output file would overwrite its source: {}", .0.display())]
    OutputOverwritesSource(PathBuf),

    /// Source path given on the command line does not exist
    #[error("Source path not found: {}", .0.display())]
    MissingSource(PathBuf),
}

impl OcrError {
    /// Returns `true` for errors caused by malformed entry or glyph geometry.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            OcrError::InvalidEntryHeight { .. }
                | OcrError::InvalidEntryWidth { .. }
                | OcrError::InvalidGlyphHeight { .. }
                | OcrError::InvalidGlyphWidth { .. }
        )
    }
}
