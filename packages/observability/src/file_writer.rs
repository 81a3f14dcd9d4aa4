//! Append-only JSONL log file writer.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, LineWriter, Write};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;

/// Shared handle to the log file. Output is flushed at every newline, so a
/// `tail -f` sees each event as soon as it is formatted.
#[derive(Clone)]
pub struct JsonlWriter {
    file: Arc<Mutex<LineWriter<File>>>,
}

impl JsonlWriter {
    /// Opens `path` for appending, creating missing parent directories.
    pub fn open(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Arc::new(Mutex::new(LineWriter::new(file))),
        })
    }
}

impl Write for JsonlWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.lock().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.lock().flush()
    }
}

impl<'a> MakeWriter<'a> for JsonlWriter {
    type Writer = JsonlWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
