//! Utility functions and constants for content sniffing.

use std::io::{self, Read};
use std::path::Path;

use crate::common::{Error, Result};

/// ZIP local file header signature
pub const ZIP_SIGNATURE: &[u8] = &[0x50, 0x4B, 0x03, 0x04];

/// Decoded bytes evaluated by text signatures.
pub const BOOK_HEADER_LEN: usize = 512;

/// Raw bytes evaluated by container signatures.
pub const CONTAINER_HEADER_LEN: usize = 261;

/// Helper function to find a pattern in a buffer efficiently.
#[inline]
pub fn find_in_buffer(buffer: &[u8], pattern: &[u8]) -> bool {
    memchr::memmem::find(buffer, pattern).is_some()
}

/// Case-insensitive comparison of the final extension of `name` with `ext`.
///
/// `ext` carries its leading dot (".fb2"). The extension is everything from
/// the last dot of the final path component, so a bare ".fb2" matches too.
pub fn has_extension(name: impl AsRef<Path>, ext: &str) -> bool {
    let Some(file_name) = name.as_ref().file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    file_name
        .rfind('.')
        .is_some_and(|dot| file_name[dot..].eq_ignore_ascii_case(ext))
}

/// Fill `buf` as far as the reader allows and return the byte count.
///
/// Stops early only at end of stream; interrupted reads are retried.
pub fn read_up_to<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Fill `buf` completely, reporting a short stream as insufficient data.
pub fn read_exact_or_short<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    let available = read_up_to(reader, buf)?;
    if available < buf.len() {
        return Err(Error::InsufficientData {
            needed: buf.len(),
            available,
        });
    }
    Ok(())
}
