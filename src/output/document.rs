//! Structured documents that a [`DataFile`](super::DataFile) can serialize.

use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesText, Event};

use crate::common::{Error, Result};

/// Document tree contract consumed by the data file writer.
///
/// Building or parsing the tree is up to the implementor; the writer only
/// needs to switch indentation and serialize.
pub trait StructuredDocument {
    /// Use one tab per nesting level when serializing.
    fn indent_tabs(&mut self);

    /// Serialize the document to `path`, replacing any existing file.
    fn write_to_file(&self, path: &Path) -> Result<()>;
}

/// Well-formed XML text, serialized either verbatim or re-indented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    source: String,
    indent: Option<(u8, usize)>,
}

impl XmlDocument {
    /// Check that `text` is well-formed XML and wrap it.
    pub fn parse(text: impl Into<String>) -> Result<Self> {
        let source = text.into();
        {
            let mut reader = Reader::from_str(&source);
            while !matches!(reader.read_event()?, Event::Eof) {}
        }
        Ok(Self {
            source,
            indent: None,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Serialize to bytes.
    ///
    /// Without indentation the original text is returned unchanged. With
    /// indentation, whitespace-only text nodes are dropped and every element
    /// starts on its own line.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let Some((indent_char, indent_size)) = self.indent else {
            return Ok(self.source.as_bytes().to_vec());
        };

        let mut reader = Reader::from_str(&self.source);
        let mut writer = Writer::new_with_indent(
            Vec::with_capacity(self.source.len()),
            indent_char,
            indent_size,
        );

        // set while inside a run of character data
        let mut in_text = false;
        loop {
            match reader.read_event()? {
                Event::Eof => break,
                Event::Text(text) if !in_text && text.iter().all(u8::is_ascii_whitespace) => {},
                Event::Text(text) => {
                    in_text = true;
                    writer.write_event(Event::Text(text))?;
                },
                // entity references stay inline with the surrounding text
                Event::GeneralRef(name) => {
                    in_text = true;
                    writer.write_event(Event::Text(BytesText::from_escaped(format!(
                        "&{};",
                        String::from_utf8_lossy(&name)
                    ))))?;
                },
                event => {
                    in_text = false;
                    writer.write_event(event)?;
                },
            }
        }

        Ok(writer.into_inner())
    }
}

impl StructuredDocument for XmlDocument {
    fn indent_tabs(&mut self) {
        self.indent = Some((b'\t', 1));
    }

    fn write_to_file(&self, path: &Path) -> Result<()> {
        let bytes = self.to_bytes()?;
        fs::write(path, bytes).map_err(|e| Error::fs("write", path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOK: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
        <FictionBook>  <body>\n    <p>Once upon a time</p>\n  </body></FictionBook>";

    #[test]
    fn test_indent_keeps_entities_inline() {
        let mut doc = XmlDocument::parse("<a><p>&amp; &lt;b&gt;</p></a>").unwrap();
        doc.indent_tabs();
        let out = String::from_utf8(doc.to_bytes().unwrap()).unwrap();
        assert_eq!(out, "<a>\n\t<p>&amp; &lt;b&gt;</p>\n</a>");
    }

    #[test]
    fn test_parse_rejects_mismatched_tags() {
        assert!(XmlDocument::parse("<a><b></a>").is_err());
        assert!(XmlDocument::parse("<a><b/></a>").is_ok());
    }

    #[test]
    fn test_verbatim_without_indent() {
        let doc = XmlDocument::parse(BOOK).unwrap();
        assert_eq!(doc.to_bytes().unwrap(), BOOK.as_bytes());
        assert_eq!(doc.as_str(), BOOK);
    }

    #[test]
    fn test_indent_tabs() {
        let mut doc = XmlDocument::parse(BOOK).unwrap();
        doc.indent_tabs();
        let out = String::from_utf8(doc.to_bytes().unwrap()).unwrap();

        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<FictionBook>"));
        assert!(out.contains("\n\t<body>"));
        assert!(out.contains("\n\t\t<p>Once upon a time</p>"));
        assert!(out.ends_with("\n</FictionBook>"));
        assert!(!out.contains("    "));
    }

    #[test]
    fn test_write_to_file_reports_path() {
        let doc = XmlDocument::parse("<a/>").unwrap();
        let err = doc
            .write_to_file(Path::new("/nonexistent/dir/a.xml"))
            .unwrap_err();
        assert!(matches!(err, Error::Fs { op: "write", .. }));
    }
}
