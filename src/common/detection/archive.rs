//! Archive member handles.
//!
//! Decoding readers cannot be rewound, so sniffing a compressed member opens
//! it twice: once for the raw BOM prefix and once for the decoded header. A
//! member handle therefore has to hand out a fresh stream on every `open`.

use std::io::Read;

use crate::common::Result;

/// A named entry inside a container that can be opened repeatedly.
pub trait ArchiveMember {
    /// Stored entry name, including any directory components.
    fn name(&self) -> &str;

    /// Open a new forward-only stream over the entry contents.
    fn open(&mut self) -> Result<impl Read + '_>;
}

#[cfg(feature = "zip-container")]
pub use self::zip_member::ZipMember;

#[cfg(feature = "zip-container")]
mod zip_member {
    use std::io::{Read, Seek};

    use zip::ZipArchive;

    use super::ArchiveMember;
    use crate::common::Result;

    /// Entry of a [`ZipArchive`] addressed by central directory index.
    ///
    /// The archive stays owned by the caller; the handle only borrows it.
    pub struct ZipMember<'a, R: Read + Seek> {
        archive: &'a mut ZipArchive<R>,
        index: usize,
        name: String,
    }

    impl<'a, R: Read + Seek> ZipMember<'a, R> {
        /// Handle for the entry at `index`.
        pub fn new(archive: &'a mut ZipArchive<R>, index: usize) -> Result<Self> {
            let name = archive.by_index_raw(index)?.name().to_string();
            Ok(Self {
                archive,
                index,
                name,
            })
        }

        pub fn index(&self) -> usize {
            self.index
        }
    }

    impl<R: Read + Seek> ArchiveMember for ZipMember<'_, R> {
        fn name(&self) -> &str {
            &self.name
        }

        fn open(&mut self) -> Result<impl Read + '_> {
            Ok(self.archive.by_index(self.index)?)
        }
    }
}
