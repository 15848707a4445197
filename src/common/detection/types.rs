//! Detectable content families and sniff results.

use crate::common::encoding::UtfEncoding;

/// Content families recognized by the sniffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// ZIP container (.zip)
    Zip,
    /// EPUB package, a ZIP with a stored `mimetype` member (.epub)
    Epub,
    /// FictionBook 2 XML document (.fb2)
    Fb2,
}

impl FileFormat {
    /// File extension used by the pre-filter, with the leading dot.
    pub const fn extension(&self) -> &'static str {
        match self {
            FileFormat::Zip => ".zip",
            FileFormat::Epub => ".epub",
            FileFormat::Fb2 => ".fb2",
        }
    }

    /// Name the content signature is registered under.
    pub const fn signature_name(&self) -> &'static str {
        match self {
            FileFormat::Zip => "zip",
            FileFormat::Epub => "epub",
            FileFormat::Fb2 => "fb2",
        }
    }

    /// MIME type of the format.
    pub const fn mime_type(&self) -> &'static str {
        match self {
            FileFormat::Zip => "application/zip",
            FileFormat::Epub => "application/epub+zip",
            FileFormat::Fb2 => "application/x-fictionbook+xml",
        }
    }
}

/// Result of sniffing a text document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SniffOutcome {
    /// Content matched the requested signature
    pub matched: bool,
    /// Encoding detected from the byte order mark
    pub encoding: UtfEncoding,
}

impl SniffOutcome {
    /// Outcome for input rejected before any content was read.
    pub const fn rejected() -> Self {
        Self {
            matched: false,
            encoding: UtfEncoding::Unknown,
        }
    }
}

/// A FictionBook member found while walking an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedBook {
    /// Position of the entry in the central directory
    pub index: usize,
    /// Stored entry name
    pub name: String,
    /// Encoding detected for the entry
    pub encoding: UtfEncoding,
}
