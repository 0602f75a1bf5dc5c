use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Incremental writer for the concatenated output document.
///
/// The file is created (truncating) up front, so a re-run never appends to a
/// previous run's output. Each record is flushed as soon as it is appended;
/// everything written so far survives a failure or cancellation later in the
/// run.
pub struct RecordWriter {
    file: BufWriter<File>,
    path: PathBuf,
    records: usize,
}

impl RecordWriter {
    pub fn create(path: &Path) -> Result<Self, PersistError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_output_dir(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Self {
            file: BufWriter::new(file),
            path: path.to_path_buf(),
            records: 0,
        })
    }

    /// Append one record: a heading line with the source URL, a blank line,
    /// the page content, and the separator.
    pub fn append_record(&mut self, url: &str, content: &str) -> Result<(), PersistError> {
        write!(self.file, "# {url}\n\n{content}\n\n---\n\n")?;
        self.file.flush()?;
        self.records += 1;
        Ok(())
    }

    pub fn records(&self) -> usize {
        self.records
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
