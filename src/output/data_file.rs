//! Pending output files.

use std::fs;
use std::path::{Path, PathBuf};

use bitflags::bitflags;
use tracing::warn;

use super::document::{StructuredDocument, XmlDocument};
use crate::common::{Error, Result};

bitflags! {
    /// Placement hints for a data file inside the produced book.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DataFlags: u8 {
        /// Do not list the file in the package manifest
        const NOT_FOR_MANIFEST = 1 << 0;
        /// Keep the file out of the reading order (spine)
        const NOT_FOR_SPINE = 1 << 1;
    }
}

/// Any file which needs saving during conversion, for example a stylesheet or
/// a rendered XHTML page.
///
/// Exactly one payload is expected to be set. When both are, the document
/// wins and the raw bytes are dropped with a warning.
#[derive(Debug, Clone)]
pub struct DataFile<D = XmlDocument> {
    pub id: String,
    pub file_name: String,
    /// Directory relative to the processing root
    pub rel_path: PathBuf,
    pub flags: DataFlags,
    pub content_type: String,
    pub data: Vec<u8>,
    pub doc: Option<D>,
}

impl<D> DataFile<D> {
    /// Data file without payload.
    pub fn new(
        id: impl Into<String>,
        file_name: impl Into<String>,
        rel_path: impl Into<PathBuf>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            rel_path: rel_path.into(),
            flags: DataFlags::empty(),
            content_type: content_type.into(),
            data: Vec::new(),
            doc: None,
        }
    }

    pub fn with_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.data = data.into();
        self
    }

    pub fn with_document(mut self, doc: D) -> Self {
        self.doc = Some(doc);
        self
    }

    pub fn with_flags(mut self, flags: DataFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Path of the file below `root` once flushed.
    pub fn target_path(&self, root: impl AsRef<Path>) -> PathBuf {
        root.as_ref().join(&self.rel_path).join(&self.file_name)
    }

    /// Nothing would be written by [`flush`](Self::flush).
    pub fn is_empty(&self) -> bool {
        self.file_name.is_empty() || (self.data.is_empty() && self.doc.is_none())
    }
}

impl<D: StructuredDocument> DataFile<D> {
    /// Write the file below `root`, creating missing directories.
    ///
    /// Does nothing, not even directory creation, when there is no file name
    /// or no payload. Flushing again overwrites the previous output.
    pub fn flush(&mut self, root: impl AsRef<Path>) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }

        let dir = root.as_ref().join(&self.rel_path);
        create_content_dir(&dir)?;
        let target = dir.join(&self.file_name);

        if let Some(doc) = self.doc.as_mut() {
            if !self.data.is_empty() {
                warn!(
                    id = %self.id,
                    path = %target.display(),
                    dropped = self.data.len(),
                    "data file has both XML and raw payload, raw bytes ignored"
                );
            }
            doc.indent_tabs();
            return doc.write_to_file(&target);
        }

        fs::write(&target, &self.data).map_err(|e| Error::fs("write", &target, e))
    }
}

fn create_content_dir(dir: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder
        .create(dir)
        .map_err(|e| Error::fs("create content directory", dir, e))
}
