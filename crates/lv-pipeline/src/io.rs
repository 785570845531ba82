//! Line-delimited JSON entry transport.
//!
//! One JSON object per line, the wire form log producers and consumers
//! already speak. The reader is an iterator so the caller keeps control
//! of pacing; a malformed line is logged and skipped rather than
//! poisoning the stream, while real I/O failures surface as errors.

use std::io::{BufRead, Write};

use lv_redact::Entry;
use tracing::warn;

use crate::error::Result;

/// Iterator over entries read from line-delimited JSON.
#[derive(Debug)]
pub struct EntryReader<R> {
    reader: R,
    line: u64,
}

impl<R: BufRead> EntryReader<R> {
    /// Wrap a buffered reader.
    pub fn new(reader: R) -> Self {
        EntryReader { reader, line: 0 }
    }
}

impl<R: BufRead> Iterator for EntryReader<R> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut buf = String::new();
            match self.reader.read_line(&mut buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line += 1;
                    let text = buf.trim_end_matches(['\n', '\r']);
                    if text.is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<Entry>(text) {
                        Ok(entry) => return Some(Ok(entry)),
                        Err(err) => {
                            warn!(line = self.line, error = %err, "skipping malformed entry");
                            continue;
                        }
                    }
                }
                Err(err) => return Some(Err(err.into())),
            }
        }
    }
}

/// Writer emitting one JSON object per line.
#[derive(Debug)]
pub struct EntryWriter<W> {
    writer: W,
}

impl<W: Write> EntryWriter<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        EntryWriter { writer }
    }

    /// Write one entry and its trailing newline.
    pub fn write(&mut self, entry: &Entry) -> Result<()> {
        serde_json::to_writer(&mut self.writer, entry)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
