//! booksniff - format and encoding detection for e-book conversion inputs
//!
//! Before a book can be converted it has to be identified: a `.fb2` file may
//! really be FictionBook XML saved as UTF-8, UTF-16 or UTF-32, with or without
//! a byte order mark, or it may be something else entirely. This crate answers
//! those questions by content sniffing a bounded header, for standalone files
//! and for members of ZIP archives, and it persists the output units produced
//! by the conversion.
//!
//! # Features
//!
//! - **Encoding detection**: classify a 4-byte prefix into a Unicode form
//! - **Decoding readers**: stream any supported form as UTF-8
//! - **Content sniffing**: extension pre-filter plus registered signatures
//! - **Archive members**: sniff entries of ZIP containers (`zip-container`)
//! - **Output units**: idempotent, directory-creating file persistence
//!
//! # Example - Sniffing a book file
//!
//! ```no_run
//! use booksniff::ContentSniffer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sniffer = ContentSniffer::default();
//! let outcome = sniffer.is_book_file("Tolstoy - War and Peace.fb2")?;
//! if outcome.matched {
//!     println!("FictionBook encoded as {}", outcome.encoding);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Finding books inside an archive
//!
//! ```no_run
//! use booksniff::ContentSniffer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sniffer = ContentSniffer::default();
//! if sniffer.is_archive_file("collection.zip")? {
//!     for book in sniffer.find_books_in_archive("collection.zip")? {
//!         println!("{} ({})", book.name, book.encoding);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Writing an output unit
//!
//! ```no_run
//! use booksniff::output::{DataFile, DataFlags, XmlDocument};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let page = XmlDocument::parse("<html><body><p>Chapter 1</p></body></html>")?;
//! let mut unit = DataFile::new("ch1", "ch1.xhtml", "OEBPS/text", "application/xhtml+xml")
//!     .with_document(page)
//!     .with_flags(DataFlags::NOT_FOR_MANIFEST);
//! unit.flush("/tmp/book-work")?;
//! # Ok(())
//! # }
//! ```

/// Shared encoding, decoding, detection and error types
pub mod common;

/// Output units written during conversion
pub mod output;

// Re-export commonly used types for convenience
pub use common::detection::{ArchiveMember, ArchivedBook, Signature};
pub use common::{
    ContentSniffer, Error, FileFormat, Result, SignatureRegistry, SniffOutcome, UtfEncoding,
    UtfReader, detect_utf, select_reader,
};
pub use output::{DataFile, DataFlags, StructuredDocument, XmlDocument};
