//! Log file tailer.
//!
//! Polls the log file size and reads only the byte range appended since the
//! last observed offset. Tailing is a debug aid: deltas are logged, not
//! pushed into an already-built graph (the ingestion engine is a one-shot
//! transform; the viewer re-fetches the full graph on refresh).

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::PathBuf;

/// Incremental reader over a growing log file
#[derive(Debug)]
pub struct LogTailer {
    path: PathBuf,
    offset: u64,
}

impl LogTailer {
    /// Create a tailer starting at the beginning of the file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            offset: 0,
        }
    }

    /// Read newly appended bytes, if any
    ///
    /// **Public** - returns `Ok(None)` when the file has not grown (or does
    /// not exist yet). A file that shrank is treated as truncated and the
    /// offset resets, so the next poll re-reads from the start.
    pub fn poll(&mut self) -> std::io::Result<Option<String>> {
        let len = match std::fs::metadata(&self.path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        if len < self.offset {
            self.offset = 0;
            return Ok(None);
        }

        if len == self.offset {
            return Ok(None);
        }

        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(self.offset))?;

        let mut delta = Vec::with_capacity((len - self.offset) as usize);
        file.read_to_end(&mut delta)?;
        self.offset += delta.len() as u64;

        Ok(Some(String::from_utf8_lossy(&delta).into_owned()))
    }
}
