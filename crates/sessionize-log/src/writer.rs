//! Output file writer for closed sessions.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use sessionize_window::{Error, SessionSink, SessionSummary};

use crate::error::{LogError, Result};

/// Writes each closed session as one newline-terminated summary line.
pub struct SummaryWriter<W: Write> {
    writer: BufWriter<W>,
    written: u64,
}

impl SummaryWriter<File> {
    /// Create (or truncate) an output file.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| LogError::Create {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Self::new(file))
    }
}

impl<W: Write> SummaryWriter<W> {
    /// Wrap any writer.
    pub fn new(inner: W) -> Self {
        Self {
            writer: BufWriter::new(inner),
            written: 0,
        }
    }

    /// Number of lines written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}

impl<W: Write> SessionSink for SummaryWriter<W> {
    fn emit(&mut self, summary: SessionSummary) -> sessionize_window::Result<()> {
        writeln!(self.writer, "{summary}").map_err(|e| Error::Sink(e.to_string()))?;
        self.written += 1;
        Ok(())
    }
}
