//! # Account OCR
//!
//! Decodes account numbers drawn as ASCII glyphs and validates them with a
//! weighted mod-11 checksum.
//!
//! ## Design Principles
//!
//! - **Exact matching**: glyphs match the table exactly or decode to `?`
//! - **Streaming processing**: input is read line by line, one entry at a time
//! - **Strict geometry**: malformed entries abort the source with an error
//! - **Atomic output**: output files only appear when a source fully decoded
//!
//! ## Example
//!
//! ```
//! use account_ocr::OcrEngine;
//! use std::io::Cursor;
//!
//! let input = concat!(
//!     "    _  _     _  _  _  _  _ \n",
//!     "  | _| _||_||_ |_   ||_||_|\n",
//!     "  ||_  _|  | _||_|  ||_| _|\n",
//! );
//! let results = OcrEngine::new().process_reader(Cursor::new(input)).unwrap();
//! assert_eq!(results[0].to_string(), "123456789");
//! ```

pub mod checksum;
pub mod engine;
pub mod entry;
pub mod error;
pub mod glyph;

pub use checksum::{checksum, classify, ParseResult, Status};
pub use engine::{output_path, parse_account_numbers, process_file, FileReport, Observer, OcrEngine};
pub use entry::{decode_account, segment, AccountNumber, ACCOUNT_NUMBER_LENGTH, ENTRY_WIDTH};
pub use error::{OcrError, Result};
pub use glyph::{decode_glyph, Digit, Glyph, GLYPHS};
