//! Unicode transformation format detection.
//!
//! Text book files are saved in whatever encoding the authoring tool chose.
//! This module classifies the first four bytes of a stream into one of the
//! supported Unicode forms so that the matching decoder can be selected with
//! [`select_reader`](crate::common::decode::select_reader).

use std::fmt;

use crate::common::bom::{BomKind, detect_bom};

/// Number of leading bytes inspected by [`detect_utf`].
pub const BOM_PREFIX_LEN: usize = 4;

/// Unicode transformation format of a text stream.
///
/// `Unknown` means no byte order mark was found; such streams are read as
/// UTF-8 without a BOM and passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UtfEncoding {
    #[default]
    Unknown,
    Utf8,
    Utf16Be,
    Utf16Le,
    Utf32Be,
    Utf32Le,
}

impl UtfEncoding {
    /// Canonical label of the encoding.
    pub const fn name(&self) -> &'static str {
        match self {
            UtfEncoding::Unknown => "unknown",
            UtfEncoding::Utf8 => "UTF-8",
            UtfEncoding::Utf16Be => "UTF-16BE",
            UtfEncoding::Utf16Le => "UTF-16LE",
            UtfEncoding::Utf32Be => "UTF-32BE",
            UtfEncoding::Utf32Le => "UTF-32LE",
        }
    }

    /// The byte order mark that identifies this encoding.
    pub const fn bom(&self) -> Option<BomKind> {
        match self {
            UtfEncoding::Unknown => None,
            UtfEncoding::Utf8 => Some(BomKind::Utf8),
            UtfEncoding::Utf16Be => Some(BomKind::Utf16Be),
            UtfEncoding::Utf16Le => Some(BomKind::Utf16Le),
            UtfEncoding::Utf32Be => Some(BomKind::Utf32Be),
            UtfEncoding::Utf32Le => Some(BomKind::Utf32Le),
        }
    }
}

impl From<BomKind> for UtfEncoding {
    fn from(kind: BomKind) -> Self {
        match kind {
            BomKind::Utf8 => UtfEncoding::Utf8,
            BomKind::Utf16Be => UtfEncoding::Utf16Be,
            BomKind::Utf16Le => UtfEncoding::Utf16Le,
            BomKind::Utf32Be => UtfEncoding::Utf32Be,
            BomKind::Utf32Le => UtfEncoding::Utf32Le,
        }
    }
}

impl fmt::Display for UtfEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a four byte prefix.
///
/// Checks run longest mark first (UTF-32BE, UTF-32LE, UTF-8, UTF-16BE,
/// UTF-16LE), so `FF FE 00 00` is always UTF-32LE. Anything else is
/// [`UtfEncoding::Unknown`].
///
/// # Examples
///
/// ```
/// use booksniff::common::encoding::{UtfEncoding, detect_utf};
///
/// assert_eq!(detect_utf(&[0xFF, 0xFE, 0x3C, 0x00]), UtfEncoding::Utf16Le);
/// assert_eq!(detect_utf(b"<?xm"), UtfEncoding::Unknown);
/// ```
#[inline]
pub fn detect_utf(prefix: &[u8; BOM_PREFIX_LEN]) -> UtfEncoding {
    detect_bom(prefix).map_or(UtfEncoding::Unknown, UtfEncoding::from)
}
