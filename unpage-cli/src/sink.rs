//! Where export payloads end up.
//!
//! The library only builds payloads. The binary decides where they go: a file named by the
//! payload, or standard output when no file was asked for.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use unpage_core::{Payload, Sink};

/// Writes each payload to the file its name points at, relative to `dir`.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileSink {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Paths written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl Sink for FileSink {
    type Error = io::Error;

    fn emit(&mut self, payload: Payload) -> Result<(), Self::Error> {
        let path = self.dir.join(&payload.filename);
        fs::write(&path, payload.content.as_bytes())?;
        self.written.push(path);
        Ok(())
    }
}

/// Prints payload content as is.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    type Error = io::Error;

    fn emit(&mut self, payload: Payload) -> Result<(), Self::Error> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(payload.content.as_bytes())?;
        handle.flush()
    }
}
