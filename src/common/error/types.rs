//! Unified error type for booksniff.
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for booksniff operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error without path context
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Filesystem operation failed on a known path
    #[error("unable to {op} {}: {source}", path.display())]
    Fs {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fewer bytes were available than the detection step requires.
    ///
    /// This is distinct from a negative match: a file that merely is not of
    /// the expected type never produces this error.
    #[error("insufficient data: needed {needed} bytes, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// Signature name was never registered with the sniffer
    #[error("content signature '{0}' is not registered")]
    SignatureNotRegistered(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// ZIP archive or entry failed on a known archive path or entry name
    #[error("unable to {op} {}: {message}", path.display())]
    Archive {
        op: &'static str,
        path: PathBuf,
        message: String,
    },

    /// XML parsing or serialization error
    #[error("XML error: {0}")]
    XmlError(String),
}

impl Error {
    /// Attach an operation name and a path to an IO error.
    pub(crate) fn fs(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Fs {
            op,
            path: path.into(),
            source,
        }
    }

    /// Give a bare IO or ZIP error the operation and path it happened on.
    ///
    /// Errors that already carry context, or are neither, pass through.
    pub(crate) fn with_context(self, op: &'static str, path: impl Into<PathBuf>) -> Self {
        match self {
            Error::Io(source) => Error::fs(op, path, source),
            Error::ZipError(message) => Error::Archive {
                op,
                path: path.into(),
                message,
            },
            other => other,
        }
    }
}

/// Result type for booksniff operations.
pub type Result<T> = std::result::Result<T, Error>;
