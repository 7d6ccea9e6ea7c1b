//! Scoped text reader handed to `probe_text_file` bodies.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// A UTF-8 text file opened for a single probe.
///
/// The handle only lives for the duration of the probe body; it is closed
/// when the probe returns, whether the body succeeded, failed or panicked.
/// Reads that hit invalid UTF-8 fail with [`io::ErrorKind::InvalidData`].
#[derive(Debug)]
pub struct TextProbe {
    rel_path: String,
    reader: BufReader<File>,
}

impl TextProbe {
    pub(crate) fn open(full_path: &Path, rel_path: &str) -> io::Result<Self> {
        let file = File::open(full_path)?;
        if file.metadata()?.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{}' is a directory", rel_path),
            ));
        }
        Ok(Self {
            rel_path: rel_path.to_string(),
            reader: BufReader::new(file),
        })
    }

    /// The probed path, relative to the dataset root.
    pub fn path(&self) -> &str {
        &self.rel_path
    }

    /// Reads one line without its terminator. `None` at end of file.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Skips blank lines and returns the first one with content, trimmed.
    pub fn first_non_empty_line(&mut self) -> io::Result<Option<String>> {
        while let Some(line) = self.next_line()? {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
        Ok(None)
    }

    /// Reads the remainder of the file.
    pub fn read_all(&mut self) -> io::Result<String> {
        let mut contents = String::new();
        self.reader.read_to_string(&mut contents)?;
        Ok(contents)
    }
}

impl Read for TextProbe {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl BufRead for TextProbe {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.reader.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.reader.consume(amt)
    }
}
