//! Request-scoped output capture.
//!
//! Printers write into a capture backed by an anonymous temporary file.
//! The capture belongs to exactly one request; dropping it (on any exit
//! path) closes and removes the file.

use std::fs::File;
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Buffer that collects everything a printer writes during one request
pub struct OutputCapture {
    sink: BufWriter<File>,
}

impl OutputCapture {
    /// Open a fresh capture, in `dir` or the system temp directory
    pub fn begin(dir: Option<&Path>) -> io::Result<Self> {
        let file = match dir {
            Some(dir) => tempfile::tempfile_in(dir)?,
            None => tempfile::tempfile()?,
        };
        Ok(Self {
            sink: BufWriter::new(file),
        })
    }

    /// The sink printers write into
    pub fn writer(&mut self) -> &mut dyn Write {
        &mut self.sink
    }

    /// Release the capture and return everything written to it
    pub fn finish(self) -> io::Result<Vec<u8>> {
        let mut file = self.sink.into_inner().map_err(|e| e.into_error())?;
        file.seek(SeekFrom::Start(0))?;
        let mut body = Vec::new();
        file.read_to_end(&mut body)?;
        Ok(body)
    }
}
