//! Streaming entry grouping and per-file processing.
//!
//! Input is consumed line by line. Every fourth line is a separator and is
//! discarded; the three lines before it form one entry. Each entry is
//! decoded and classified as soon as the next line arrives (or at end of
//! input), so results are emitted incrementally in input order.

use crate::checksum::ParseResult;
use crate::entry::decode_account;
use crate::error::{OcrError, Result};
use crate::glyph::GLYPH_HEIGHT;
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::mem;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Lines per entry group, including the trailing separator.
const GROUP_LINES: usize = GLYPH_HEIGHT + 1;

/// Extension of generated output files.
pub const OUTPUT_EXTENSION: &str = "out";

/// Callbacks invoked while a source is processed.
///
/// Every hook defaults to a no-op, so callers only set the ones they need.
pub struct Observer<'a> {
    on_result: Box<dyn FnMut(&ParseResult) + 'a>,
    on_complete: Box<dyn FnMut(&[ParseResult]) + 'a>,
    on_error: Box<dyn FnMut(&OcrError) + 'a>,
}

impl<'a> Observer<'a> {
    /// Observer with all hooks disabled.
    pub fn new() -> Self {
        Observer {
            on_result: Box::new(|_| {}),
            on_complete: Box::new(|_| {}),
            on_error: Box::new(|_| {}),
        }
    }

    /// Called once per decoded entry, in input order.
    pub fn on_result(mut self, f: impl FnMut(&ParseResult) + 'a) -> Self {
        self.on_result = Box::new(f);
        self
    }

    /// Called once with every result after the input is exhausted.
    pub fn on_complete(mut self, f: impl FnMut(&[ParseResult]) + 'a) -> Self {
        self.on_complete = Box::new(f);
        self
    }

    /// Called once if processing aborts.
    pub fn on_error(mut self, f: impl FnMut(&OcrError) + 'a) -> Self {
        self.on_error = Box::new(f);
        self
    }
}

impl Default for Observer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// The entry grouping state machine.
///
/// One engine processes one source. It owns the rows of the entry being
/// collected and the results decoded so far.
pub struct OcrEngine<'a> {
    observer: Observer<'a>,

    /// Optional writer receiving one line per decoded entry.
    sink: Option<Box<dyn Write + 'a>>,

    /// 1-based number of the last line read.
    line: usize,

    /// Line number of the first row of the pending entry.
    entry_line: usize,

    /// Rows of the entry being collected.
    rows: Vec<String>,

    results: Vec<ParseResult>,
}

impl<'a> OcrEngine<'a> {
    /// Creates an engine with no observer and no sink.
    pub fn new() -> Self {
        OcrEngine {
            observer: Observer::new(),
            sink: None,
            line: 0,
            entry_line: 0,
            rows: Vec::with_capacity(GLYPH_HEIGHT),
            results: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: Observer<'a>) -> Self {
        self.observer = observer;
        self
    }

    /// Streams each decoded entry to `sink` as `"<account> <status>"`.
    pub fn with_sink<W: Write + 'a>(mut self, sink: W) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Processes every line from a buffered reader.
    pub fn process_reader<R: BufRead>(self, reader: R) -> Result<Vec<ParseResult>> {
        self.process_lines(reader.lines())
    }

    /// Processes a sequence of lines and returns the results in input order.
    ///
    /// A structural entry error or an I/O error stops processing: no later
    /// entries are decoded and the error is returned. The sink is flushed
    /// on every exit path.
    pub fn process_lines<I>(mut self, lines: I) -> Result<Vec<ParseResult>>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        let outcome = self.drive(lines);
        self.conclude(outcome)
    }

    /// Runs the state machine over `lines` without signalling completion.
    fn drive<I>(&mut self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        let outcome = self.run(lines).and_then(|()| self.flush_sink());
        if outcome.is_err() {
            if let Err(flush_err) = self.flush_sink() {
                warn!("Failed to flush output after abort: {}", flush_err);
            }
        }
        outcome
    }

    /// Fires `on_complete` or `on_error` for the final outcome.
    fn conclude(mut self, outcome: Result<()>) -> Result<Vec<ParseResult>> {
        match outcome {
            Ok(()) => {
                (self.observer.on_complete)(&self.results);
                Ok(self.results)
            }
            Err(e) => {
                (self.observer.on_error)(&e);
                Err(e)
            }
        }
    }

    fn run<I>(&mut self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        for line in lines {
            self.push_line(line?)?;
        }
        self.finish()
    }

    /// Feeds one line into the state machine.
    fn push_line(&mut self, line: String) -> Result<()> {
        self.line += 1;

        if self.rows.len() == GLYPH_HEIGHT {
            self.flush_entry()?;
        }

        if self.line % GROUP_LINES == 0 {
            debug!("Line {}: separator skipped", self.line);
            return Ok(());
        }

        if self.rows.is_empty() {
            self.entry_line = self.line;
        }
        self.rows.push(line);
        Ok(())
    }

    /// Flushes a complete trailing entry at end of input.
    fn finish(&mut self) -> Result<()> {
        match self.rows.len() {
            0 => Ok(()),
            GLYPH_HEIGHT => self.flush_entry(),
            n => {
                warn!(
                    "Line {}: dropping incomplete trailing entry ({} of {} rows)",
                    self.entry_line, n, GLYPH_HEIGHT
                );
                self.rows.clear();
                Ok(())
            }
        }
    }

    /// Decodes, classifies and emits the pending entry.
    fn flush_entry(&mut self) -> Result<()> {
        let rows = mem::take(&mut self.rows);

        let account = decode_account(&rows).map_err(|e| {
            warn!("Line {}: {}", self.entry_line, e);
            e
        })?;
        let result = ParseResult::new(account);
        debug!(
            "Line {}: decoded {} ({})",
            self.entry_line,
            result.account(),
            result.status()
        );

        if let Some(sink) = self.sink.as_mut() {
            writeln!(sink, "{}", result)?;
        }
        (self.observer.on_result)(&result);
        self.results.push(result);
        Ok(())
    }

    fn flush_sink(&mut self) -> Result<()> {
        if let Some(sink) = self.sink.as_mut() {
            sink.flush()?;
        }
        Ok(())
    }
}

impl Default for OcrEngine<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of one successfully processed source file.
#[derive(Debug)]
pub struct FileReport {
    pub source: PathBuf,
    pub output: PathBuf,
    pub results: Vec<ParseResult>,
}

/// Name of the output file generated for `source`.
fn output_file_name(source: &Path) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}.{}", stem, OUTPUT_EXTENSION)
}

/// Path of the output file generated for `source` inside `dest_dir`.
pub fn output_path(source: &Path, dest_dir: &Path) -> PathBuf {
    dest_dir.join(output_file_name(source))
}

/// Decodes one source file and writes its results next to it in `dest_dir`.
///
/// Output is staged in a temporary file and only moved into place once the
/// whole source decoded, so a failed run never leaves a partial output file.
/// `on_complete` fires only after the output file is in place.
pub fn process_file(source: &Path, dest_dir: &Path, observer: Observer<'_>) -> Result<FileReport> {
    let output = output_path(source, dest_dir);
    let mut engine = OcrEngine::new().with_observer(observer);

    let outcome = open_staged(source, dest_dir).and_then(|(input, staged)| {
        let sink = staged.as_file().try_clone()?;
        engine.sink = Some(Box::new(BufWriter::new(sink)));
        engine.drive(input.lines())?;
        engine.sink = None;

        staged.persist(&output).map_err(|e| e.error)?;
        Ok(())
    });
    let results = engine.conclude(outcome)?;

    info!(
        "Decoded {} account numbers from {} into {}",
        results.len(),
        source.display(),
        output.display()
    );

    Ok(FileReport {
        source: source.to_path_buf(),
        output,
        results,
    })
}

/// Opens `source` and creates the staging file for its output.
fn open_staged(source: &Path, dest_dir: &Path) -> Result<(BufReader<File>, NamedTempFile)> {
    let resolved_source = fs::canonicalize(source)?;
    let resolved_output = fs::canonicalize(dest_dir)?.join(output_file_name(source));
    if resolved_source == resolved_output {
        return Err(OcrError::OutputOverwritesSource(source.to_path_buf()));
    }

    let input = BufReader::new(File::open(source)?);
    let staged = NamedTempFile::new_in(dest_dir)?;
    set_output_permissions(staged.as_file())?;
    Ok((input, staged))
}

/// Temporary files are created owner-only; outputs get regular file modes.
#[cfg(unix)]
fn set_output_permissions(file: &File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_output_permissions(_file: &File) -> io::Result<()> {
    Ok(())
}

/// Reads a file and returns one `"<account> <status>"` line per entry.
pub fn parse_account_numbers<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let input = BufReader::new(File::open(path)?);
    let results = OcrEngine::new().process_reader(input)?;
    Ok(results.iter().map(ToString::to_string).collect())
}
