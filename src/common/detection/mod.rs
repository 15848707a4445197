//! Content sniffing for book inputs.
//!
//! This module decides whether a file, or a member of a ZIP container, really
//! is one of the supported inputs. Each check is gated on the file extension
//! and then confirmed against a registered content signature, reading only a
//! bounded header.

// Submodule declarations
pub mod archive;
pub mod functions;
pub mod signature;
pub mod types;
pub mod utils;

// Re-exports
#[cfg(feature = "zip-container")]
pub use archive::ZipMember;
pub use archive::ArchiveMember;
pub use functions::{ContentSniffer, detect_stream_encoding};
pub use signature::{Matcher, Signature, SignatureRegistry};
pub use types::{ArchivedBook, FileFormat, SniffOutcome};

#[cfg(test)]
mod tests;
