//! File-level sniffing tests against real files in scratch directories.

mod book_file;

pub(super) use crate::common::decode::encode;

/// FictionBook text well past the 512 byte header.
pub(super) fn fiction_book() -> String {
    let mut doc = String::from(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <FictionBook xmlns=\"http://www.gribuser.ru/xml/fictionbook/2.0\" \
         xmlns:l=\"http://www.w3.org/1999/xlink\">\n<description><title-info>\n",
    );
    doc.push_str("<book-title>Война и мир</book-title>\n");
    doc.push_str(&"<annotation><p>Роман-эпопея Льва Толстого.</p></annotation>\n".repeat(12));
    doc.push_str("</title-info></description>\n<body><p>Eh bien, mon prince.</p></body>\n</FictionBook>\n");
    doc
}

/// Deterministic noise that does not start with a BOM or `<?xml`.
pub(super) fn noise(len: usize) -> Vec<u8> {
    let mut state: u32 = 0x2545_F491;
    let mut out: Vec<u8> = (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect();
    out[0] = 0x89;
    out
}
