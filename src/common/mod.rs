//! Common types, traits, and utilities shared across the crate.
//!
//! Encoding detection and decoding live here next to the sniffer that uses
//! them, together with the unified error type.

// Submodule declarations
pub mod bom;
pub mod decode;
pub mod detection;
pub mod encoding;
pub mod error;

// Re-exports for convenience
pub use decode::{UtfReader, select_reader};
pub use detection::{ContentSniffer, FileFormat, SignatureRegistry, SniffOutcome};
pub use encoding::{UtfEncoding, detect_utf};
pub use error::{Error, Result};
