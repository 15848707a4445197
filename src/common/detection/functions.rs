//! Content sniffing entry points.
//!
//! Every check first compares the file extension (a cheap pre-filter, not a
//! security boundary) and only then looks at content. Text documents are
//! sniffed on their decoded header so that a UTF-16 or UTF-32 file matches the
//! same textual signature as a UTF-8 one.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use tracing::debug;

use super::archive::ArchiveMember;
use super::signature::SignatureRegistry;
use super::types::{FileFormat, SniffOutcome};
use super::utils::{
    BOOK_HEADER_LEN, CONTAINER_HEADER_LEN, has_extension, read_exact_or_short, read_up_to,
};
use crate::common::decode::select_reader;
use crate::common::encoding::{BOM_PREFIX_LEN, UtfEncoding, detect_utf};
use crate::common::{Error, Result};

#[cfg(feature = "zip-container")]
use super::archive::ZipMember;
#[cfg(feature = "zip-container")]
use super::types::ArchivedBook;

/// Extension-gated content sniffer.
///
/// Owns the signature registry it evaluates against. The sniffer is
/// immutable after construction and can be shared between threads; each call
/// opens and closes its own handles.
///
/// # Examples
///
/// ```rust,no_run
/// use booksniff::common::detection::ContentSniffer;
///
/// let sniffer = ContentSniffer::default();
/// let outcome = sniffer.is_book_file("library/war-and-peace.fb2")?;
/// if outcome.matched {
///     println!("FictionBook in {}", outcome.encoding);
/// }
/// # Ok::<(), booksniff::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ContentSniffer {
    registry: SignatureRegistry,
}

impl Default for ContentSniffer {
    fn default() -> Self {
        Self::new(SignatureRegistry::with_defaults())
    }
}

impl ContentSniffer {
    /// Build a sniffer over a fully populated registry.
    pub fn new(registry: SignatureRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &SignatureRegistry {
        &self.registry
    }

    /// Evaluate the signature registered as `format` against `header`.
    fn matches(&self, format: FileFormat, header: &[u8]) -> Result<bool> {
        let name = format.signature_name();
        self.registry
            .lookup(name)
            .map(|signature| signature.matches(header))
            .ok_or_else(|| Error::SignatureNotRegistered(name.to_string()))
    }

    /// Detect whether `path` is a FictionBook file and which encoding it uses.
    ///
    /// A name without the `.fb2` extension yields a negative outcome without
    /// touching the filesystem. A `.fb2` file shorter than the prefix or the
    /// decoded header is an [`Error::InsufficientData`].
    pub fn is_book_file(&self, path: impl AsRef<Path>) -> Result<SniffOutcome> {
        let path = path.as_ref();
        if !has_extension(path, FileFormat::Fb2.extension()) {
            return Ok(SniffOutcome::rejected());
        }

        let mut file = File::open(path).map_err(|e| Error::fs("open", path, e))?;

        let mut prefix = [0u8; BOM_PREFIX_LEN];
        read_exact_or_short(&mut file, &mut prefix).map_err(|e| e.with_context("read", path))?;
        let encoding = detect_utf(&prefix);
        file.rewind().map_err(|e| Error::fs("seek", path, e))?;

        let mut header = [0u8; BOOK_HEADER_LEN];
        read_exact_or_short(&mut select_reader(&mut file, encoding), &mut header)
            .map_err(|e| e.with_context("read", path))?;

        let matched = self.matches(FileFormat::Fb2, &header)?;
        debug!(path = %path.display(), matched, %encoding, "sniffed book file");
        Ok(SniffOutcome { matched, encoding })
    }

    /// Detect whether an archive member is a FictionBook document.
    ///
    /// The member is opened twice, once for the BOM prefix and once for the
    /// decoded header. When the stored name fails the extension check the
    /// member is never opened.
    pub fn is_book_in_archive<M: ArchiveMember>(&self, member: &mut M) -> Result<SniffOutcome> {
        if !has_extension(member.name(), FileFormat::Fb2.extension()) {
            return Ok(SniffOutcome::rejected());
        }
        let name = member.name().to_string();

        let encoding = {
            let mut stream = member
                .open()
                .map_err(|e| e.with_context("open member", name.as_str()))?;
            let mut prefix = [0u8; BOM_PREFIX_LEN];
            read_exact_or_short(&mut stream, &mut prefix)
                .map_err(|e| e.with_context("read member", name.as_str()))?;
            detect_utf(&prefix)
        };

        let matched = {
            let stream = member
                .open()
                .map_err(|e| e.with_context("open member", name.as_str()))?;
            let mut header = [0u8; BOOK_HEADER_LEN];
            read_exact_or_short(&mut select_reader(stream, encoding), &mut header)
                .map_err(|e| e.with_context("read member", name.as_str()))?;
            self.matches(FileFormat::Fb2, &header)?
        };

        debug!(member = %name, matched, %encoding, "sniffed archive member");
        Ok(SniffOutcome { matched, encoding })
    }

    /// Detect whether `path` is a ZIP archive.
    pub fn is_archive_file(&self, path: impl AsRef<Path>) -> Result<bool> {
        self.is_container_file(path.as_ref(), FileFormat::Zip)
    }

    /// Detect whether `path` is an EPUB package.
    pub fn is_epub_file(&self, path: impl AsRef<Path>) -> Result<bool> {
        self.is_container_file(path.as_ref(), FileFormat::Epub)
    }

    /// Binary container check on a raw, undecoded header.
    ///
    /// Short files are not an error here: magic numbers simply fail to match.
    fn is_container_file(&self, path: &Path, format: FileFormat) -> Result<bool> {
        if !has_extension(path, format.extension()) {
            return Ok(false);
        }

        let mut file = File::open(path).map_err(|e| Error::fs("open", path, e))?;
        let mut header = [0u8; CONTAINER_HEADER_LEN];
        let n = read_up_to(&mut file, &mut header).map_err(|e| Error::fs("read", path, e))?;

        let matched = self.matches(format, &header[..n])?;
        debug!(path = %path.display(), ?format, matched, "sniffed container file");
        Ok(matched)
    }

    /// Walk every entry of the ZIP at `path` and report the FictionBook
    /// members with their encodings, in central directory order.
    ///
    /// A `.fb2` entry that is too short or cannot be decompressed is logged
    /// and skipped. Failures of the archive itself abort the walk.
    #[cfg(feature = "zip-container")]
    pub fn find_books_in_archive(&self, path: impl AsRef<Path>) -> Result<Vec<ArchivedBook>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::fs("open", path, e))?;
        let mut archive = zip::ZipArchive::new(file)
            .map_err(|e| Error::from(e).with_context("open archive", path))?;

        let mut books = Vec::new();
        for index in 0..archive.len() {
            let mut member = ZipMember::new(&mut archive, index)
                .map_err(|e| e.with_context("read archive entry", path))?;
            if member.name().ends_with('/') {
                continue;
            }
            match self.is_book_in_archive(&mut member) {
                Ok(outcome) if outcome.matched => books.push(ArchivedBook {
                    index,
                    name: member.name().to_string(),
                    encoding: outcome.encoding,
                }),
                Ok(_) => {},
                Err(err @ Error::InsufficientData { .. }) => {
                    debug!(
                        archive = %path.display(),
                        member = member.name(),
                        %err,
                        "skipping short member"
                    );
                },
                Err(err @ Error::Archive { .. }) => {
                    tracing::warn!(
                        archive = %path.display(),
                        member = member.name(),
                        %err,
                        "skipping unreadable member"
                    );
                },
                Err(err) => return Err(err),
            }
        }
        Ok(books)
    }
}

/// Read the BOM prefix of any seekable source and leave it rewound.
///
/// Useful for callers that already hold an open handle.
pub fn detect_stream_encoding<R: Read + Seek>(reader: &mut R) -> Result<UtfEncoding> {
    let mut prefix = [0u8; BOM_PREFIX_LEN];
    read_exact_or_short(reader, &mut prefix)?;
    reader.rewind()?;
    Ok(detect_utf(&prefix))
}

// The sniffer is shared across batch workers.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ContentSniffer>();
};
