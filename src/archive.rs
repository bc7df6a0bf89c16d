//! Zip archive writer for exported documents.

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::CompressionMethod;
use zip::write::{FileOptions, ZipWriter};

/// Append-only zip container on disk
///
/// Entries are deflated and written in the order they are added. The central
/// directory is written by [`finish`](Self::finish). If the writer is dropped
/// without `finish`, `ZipWriter`'s own drop still finalizes the file, so a
/// partially filled archive stays readable.
pub struct ArchiveWriter {
    path: PathBuf,
    writer: ZipWriter<File>,
    names: HashSet<String>,
}

impl ArchiveWriter {
    /// Create (or truncate) the archive file at `path`
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("failed to create {}: {}", path.display(), e),
            ))
        })?;

        debug!(?path, "created export archive");

        Ok(Self {
            path,
            writer: ZipWriter::new(file),
            names: HashSet::new(),
        })
    }

    /// Write one entry holding `content`
    ///
    /// # Errors
    /// [`Error::DuplicateEntry`] if `name` was already written; I/O or zip errors otherwise.
    pub fn add_entry(&mut self, name: &str, content: &[u8]) -> Result<()> {
        if self.names.contains(name) {
            return Err(Error::DuplicateEntry(name.to_string()));
        }

        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        self.writer.start_file(name, options)?;
        self.names.insert(name.to_string());
        self.writer.write_all(content)?;

        debug!(entry = name, bytes = content.len(), "wrote archive entry");
        Ok(())
    }

    /// Number of entries written so far
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if no entry has been written
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Path of the archive on disk
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the central directory and close the file
    ///
    /// Returns the number of entries in the archive.
    pub fn finish(mut self) -> Result<usize> {
        let file = self.writer.finish()?;
        file.sync_all()?;

        info!(path = ?self.path, entries = self.names.len(), "finalized export archive");
        Ok(self.names.len())
    }
}
