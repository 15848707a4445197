//! Byte Order Mark (BOM) tables shared by the encoding detector and decoders.
//!
//! The order of checks matters: the UTF-16LE mark `FF FE` is a prefix of the
//! UTF-32LE mark `FF FE 00 00`, so four-byte marks are always tested first.

/// Supported BOM encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BomKind {
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

impl BomKind {
    /// Returns the byte representation of the BOM.
    #[inline]
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            BomKind::Utf8 => &UTF8_BOM,
            BomKind::Utf16Le => &UTF16_LE_BOM,
            BomKind::Utf16Be => &UTF16_BE_BOM,
            BomKind::Utf32Le => &UTF32_LE_BOM,
            BomKind::Utf32Be => &UTF32_BE_BOM,
        }
    }

    /// Returns the length in bytes of the BOM.
    #[inline]
    #[allow(clippy::len_without_is_empty)] // No need to check for empty BOMs
    pub const fn len(&self) -> usize {
        self.as_bytes().len()
    }
}

/// UTF-8 BOM bytes.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
/// UTF-16 little-endian BOM bytes.
pub const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
/// UTF-16 big-endian BOM bytes.
pub const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];
/// UTF-32 little-endian BOM bytes.
pub const UTF32_LE_BOM: [u8; 4] = [0xFF, 0xFE, 0x00, 0x00];
/// UTF-32 big-endian BOM bytes.
pub const UTF32_BE_BOM: [u8; 4] = [0x00, 0x00, 0xFE, 0xFF];

/// Priority order for BOM matching, longest marks first.
const BOM_PRIORITY: [BomKind; 5] = [
    BomKind::Utf32Be,
    BomKind::Utf32Le,
    BomKind::Utf8,
    BomKind::Utf16Be,
    BomKind::Utf16Le,
];

/// Detects the BOM at the start of `buf`, if any.
///
/// Buffers shorter than a given mark simply never match that mark.
pub fn detect_bom(buf: &[u8]) -> Option<BomKind> {
    BOM_PRIORITY
        .into_iter()
        .find(|kind| buf.starts_with(kind.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_each_bom() {
        for kind in BOM_PRIORITY {
            let mut buf = kind.as_bytes().to_vec();
            buf.extend_from_slice(b"<?xml");
            assert_eq!(detect_bom(&buf), Some(kind));
        }
    }

    #[test]
    fn test_utf32le_wins_over_utf16le() {
        assert_eq!(detect_bom(&[0xFF, 0xFE, 0x00, 0x00]), Some(BomKind::Utf32Le));
        assert_eq!(detect_bom(&[0xFF, 0xFE, 0x3C, 0x00]), Some(BomKind::Utf16Le));
    }

    #[test]
    fn test_short_buffers() {
        assert_eq!(detect_bom(&[]), None);
        assert_eq!(detect_bom(&[0xEF, 0xBB]), None);
        assert_eq!(detect_bom(&[0xFE, 0xFF]), Some(BomKind::Utf16Be));
    }

    #[test]
    fn test_bom_lengths() {
        assert_eq!(BomKind::Utf32Be.as_bytes(), UTF32_BE_BOM);
        assert_eq!(BomKind::Utf32Be.len(), 4);
        assert_eq!(BomKind::Utf8.len(), 3);
        assert_eq!(BomKind::Utf16Le.len(), 2);
    }
}
