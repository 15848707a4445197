//! Content signatures and the registry that owns them.
//!
//! A signature is a named predicate over a header buffer. Signatures are
//! registered while the application starts up, before a
//! [`ContentSniffer`](super::ContentSniffer) is built; once the registry is
//! handed to the sniffer it can no longer be changed.

use std::collections::HashMap;

use super::types::FileFormat;
use super::utils::{ZIP_SIGNATURE, find_in_buffer};

/// Predicate evaluated against a header buffer.
pub type Matcher = fn(&[u8]) -> bool;

/// A named content check.
#[derive(Debug, Clone, Copy)]
pub struct Signature {
    name: &'static str,
    mime_type: &'static str,
    matcher: Matcher,
}

impl Signature {
    pub const fn new(name: &'static str, mime_type: &'static str, matcher: Matcher) -> Self {
        Self {
            name,
            mime_type,
            matcher,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    /// Evaluate the signature against `header`.
    #[inline]
    pub fn matches(&self, header: &[u8]) -> bool {
        (self.matcher)(header)
    }
}

/// Append-only set of signatures keyed by name.
#[derive(Debug, Clone, Default)]
pub struct SignatureRegistry {
    signatures: HashMap<&'static str, Signature>,
}

impl SignatureRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the ZIP, EPUB and FictionBook signatures.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for signature in [
            Signature::new(
                FileFormat::Zip.signature_name(),
                FileFormat::Zip.mime_type(),
                is_zip,
            ),
            Signature::new(
                FileFormat::Epub.signature_name(),
                FileFormat::Epub.mime_type(),
                is_epub,
            ),
            Signature::new(
                FileFormat::Fb2.signature_name(),
                FileFormat::Fb2.mime_type(),
                is_fiction_book,
            ),
        ] {
            registry.register(signature);
        }
        registry
    }

    /// Add a signature.
    ///
    /// Returns `false` and keeps the existing entry if the name is taken.
    pub fn register(&mut self, signature: Signature) -> bool {
        if self.signatures.contains_key(signature.name) {
            return false;
        }
        self.signatures.insert(signature.name, signature);
        true
    }

    pub fn lookup(&self, name: &str) -> Option<&Signature> {
        self.signatures.get(name)
    }

    /// MIME type registered for `name`.
    pub fn mime_type(&self, name: &str) -> Option<&'static str> {
        self.lookup(name).map(Signature::mime_type)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.signatures.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

/// ZIP local file header magic.
pub fn is_zip(buf: &[u8]) -> bool {
    buf.len() > 3
        && buf[0] == ZIP_SIGNATURE[0]
        && buf[1] == ZIP_SIGNATURE[1]
        && (buf[2] == 0x03 || buf[2] == 0x05 || buf[2] == 0x07)
        && (buf[3] == 0x04 || buf[3] == 0x06 || buf[3] == 0x08)
}

/// EPUB: a ZIP whose first, stored member is `mimetype` holding
/// `application/epub+zip`. The name and content start at offset 30 of the
/// first local header.
pub fn is_epub(buf: &[u8]) -> bool {
    const MARKER: &[u8] = b"mimetypeapplication/epub+zip";
    buf.starts_with(ZIP_SIGNATURE) && buf.get(30..30 + MARKER.len()) == Some(MARKER)
}

/// FictionBook: an XML declaration followed somewhere in the header by the
/// `<FictionBook` root element.
pub fn is_fiction_book(buf: &[u8]) -> bool {
    buf.starts_with(b"<?xml") && find_in_buffer(buf, b"<FictionBook")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_registered() {
        let registry = SignatureRegistry::with_defaults();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.mime_type("fb2"), Some("application/x-fictionbook+xml"));
        assert!(registry.lookup("zip").is_some());
        assert!(registry.lookup("epub").is_some());
        assert!(registry.lookup("pdf").is_none());
    }

    #[test]
    fn test_registration_is_append_only() {
        let mut registry = SignatureRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.register(Signature::new("any", "application/octet-stream", |_| true)));
        assert!(!registry.register(Signature::new("any", "text/plain", |_| false)));

        let kept = registry.lookup("any").unwrap();
        assert_eq!(kept.mime_type(), "application/octet-stream");
        assert!(kept.matches(b""));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["any"]);
    }

    #[test]
    fn test_fiction_book_signature() {
        assert!(is_fiction_book(
            b"<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<FictionBook xmlns=\"http://www.gribuser.ru/xml/fictionbook/2.0\">"
        ));
        assert!(!is_fiction_book(b"  <?xml version=\"1.0\"?><FictionBook>"));
        assert!(!is_fiction_book(b"<?xml version=\"1.0\"?><html>"));
        assert!(!is_fiction_book(b""));
    }

    #[test]
    fn test_container_signatures() {
        let mut epub = Vec::from(ZIP_SIGNATURE);
        epub.resize(30, 0);
        epub.extend_from_slice(b"mimetypeapplication/epub+zip");

        assert!(is_zip(&epub));
        assert!(is_epub(&epub));
        assert!(is_zip(b"PK\x05\x06"));
        assert!(!is_epub(b"PK\x03\x04"));
        assert!(!is_zip(b"PK"));
        assert!(!is_zip(b"<?xml"));
    }
}
