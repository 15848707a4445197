use std::fs;
use std::path::Path;

use tempfile::tempdir;

use super::{encode, fiction_book, noise};
use crate::common::Error;
use crate::common::detection::{ContentSniffer, SniffOutcome};
use crate::common::encoding::UtfEncoding;

fn write(dir: &Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).expect("write fixture");
    path
}

#[test]
fn extension_filter_is_case_insensitive() {
    let dir = tempdir().expect("create temp dir");
    let sniffer = ContentSniffer::default();
    let book = fiction_book();

    for name in ["BOOK.FB2", "book.fb2", "Book.Fb2"] {
        let path = write(dir.path(), name, book.as_bytes());
        let outcome = sniffer.is_book_file(&path).expect("sniff");
        assert!(outcome.matched, "{name}");
        assert_eq!(outcome.encoding, UtfEncoding::Unknown);
    }

    let path = write(dir.path(), "book.txt", book.as_bytes());
    assert_eq!(
        sniffer.is_book_file(&path).expect("sniff"),
        SniffOutcome::rejected()
    );
}

#[test]
fn binary_content_is_not_a_match() {
    let dir = tempdir().expect("create temp dir");
    let path = write(dir.path(), "cover.fb2", &noise(4096));

    let outcome = ContentSniffer::default()
        .is_book_file(&path)
        .expect("random bytes are a negative match, not an error");
    assert!(!outcome.matched);
}

#[test]
fn utf16le_book_is_detected() {
    let dir = tempdir().expect("create temp dir");
    let bytes = encode(&fiction_book(), UtfEncoding::Utf16Le);
    assert_eq!(&bytes[..4], &[0xFF, 0xFE, b'<', 0x00]);
    let path = write(dir.path(), "wide.fb2", &bytes);

    let outcome = ContentSniffer::default().is_book_file(&path).expect("sniff");
    assert_eq!(
        outcome,
        SniffOutcome {
            matched: true,
            encoding: UtfEncoding::Utf16Le
        }
    );
}

#[test]
fn every_bom_form_is_detected() {
    let dir = tempdir().expect("create temp dir");
    let sniffer = ContentSniffer::default();

    for encoding in [
        UtfEncoding::Utf8,
        UtfEncoding::Utf16Be,
        UtfEncoding::Utf16Le,
        UtfEncoding::Utf32Be,
        UtfEncoding::Utf32Le,
    ] {
        let name = format!("{}.fb2", encoding.name());
        let path = write(dir.path(), &name, &encode(&fiction_book(), encoding));
        let outcome = sniffer.is_book_file(&path).expect("sniff");
        assert!(outcome.matched, "{encoding}");
        assert_eq!(outcome.encoding, encoding);
    }
}

#[test]
fn utf16_without_bom_does_not_match() {
    let dir = tempdir().expect("create temp dir");
    let mut bytes = encode(&fiction_book(), UtfEncoding::Utf16Le);
    bytes.drain(..2);
    let path = write(dir.path(), "nobom.fb2", &bytes);

    let outcome = ContentSniffer::default().is_book_file(&path).expect("sniff");
    assert!(!outcome.matched);
    assert_eq!(outcome.encoding, UtfEncoding::Unknown);
}

#[test]
fn short_book_is_an_error() {
    let dir = tempdir().expect("create temp dir");
    let sniffer = ContentSniffer::default();

    let path = write(
        dir.path(),
        "tiny.fb2",
        b"<?xml version=\"1.0\"?><FictionBook/>",
    );
    match sniffer.is_book_file(&path) {
        Err(Error::InsufficientData { needed, available }) => {
            assert_eq!(needed, 512);
            assert_eq!(available, 35);
        },
        other => panic!("expected insufficient data, got {other:?}"),
    }

    let path = write(dir.path(), "empty.fb2", b"");
    assert!(matches!(
        sniffer.is_book_file(&path),
        Err(Error::InsufficientData {
            needed: 4,
            available: 0
        })
    ));
}

#[test]
fn container_files() {
    let dir = tempdir().expect("create temp dir");
    let sniffer = ContentSniffer::default();

    let mut epub = b"PK\x03\x04".to_vec();
    epub.resize(30, 0);
    epub.extend_from_slice(b"mimetypeapplication/epub+zip");
    epub.extend_from_slice(&noise(256));

    let path = write(dir.path(), "novel.EPUB", &epub);
    assert!(sniffer.is_epub_file(&path).expect("sniff"));
    assert!(!sniffer.is_archive_file(&path).expect("sniff"));

    let path = write(dir.path(), "novel.zip", &epub);
    assert!(sniffer.is_archive_file(&path).expect("sniff"));
    assert!(!sniffer.is_epub_file(&path).expect("sniff"));

    // short files are simply not containers
    let path = write(dir.path(), "stub.zip", b"PK");
    assert!(!sniffer.is_archive_file(&path).expect("sniff"));

    let path = write(dir.path(), "fake.epub", &noise(512));
    assert!(!sniffer.is_epub_file(&path).expect("sniff"));
}
