//! Output units produced during conversion.
//!
//! A [`DataFile`] is one file that still has to be written below the working
//! directory, either as raw bytes or as an XML document re-indented with tabs.

// Submodule declarations
pub mod data_file;
pub mod document;

// Re-exports
pub use data_file::{DataFile, DataFlags};
pub use document::{StructuredDocument, XmlDocument};
