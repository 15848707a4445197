//! Error types shared by detection, decoding and output.
//!
//! Every recoverable failure surfaces to the immediate caller as an [`Error`];
//! nothing in this crate retries or swallows an error.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
