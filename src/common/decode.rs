//! Decoding readers that turn any supported Unicode form into UTF-8.
//!
//! [`select_reader`] wraps a byte source according to a detected
//! [`UtfEncoding`]. The result is a forward-only [`Read`] implementation: the
//! decoder keeps state between calls, so the stream cannot be rewound once
//! decoding has started.

use std::io::{self, Read};

use encoding_rs::{CoderResult, Decoder};

use crate::common::encoding::UtfEncoding;

/// Size of the raw input chunk pulled from the source per refill.
const INPUT_CHUNK: usize = 4096;
/// Decoded output buffer; large enough for one input chunk of UTF-16 expanding
/// to three UTF-8 bytes per unit.
const OUTPUT_CHUNK: usize = INPUT_CHUNK * 3 / 2 + 16;

/// Wrap `reader` so that reading from it yields UTF-8 text.
///
/// - [`UtfEncoding::Unknown`] passes bytes through unchanged.
/// - [`UtfEncoding::Utf8`] strips a leading UTF-8 BOM.
/// - UTF-16 and UTF-32 variants transcode from the given unit order and
///   consume a matching BOM if one is present.
///
/// Malformed input is replaced with U+FFFD. IO errors from `reader` are
/// returned as is.
///
/// # Examples
///
/// ```
/// use std::io::Read;
/// use booksniff::common::decode::select_reader;
/// use booksniff::common::encoding::UtfEncoding;
///
/// let raw: &[u8] = &[0xFF, 0xFE, b'h', 0, b'i', 0];
/// let mut text = String::new();
/// select_reader(raw, UtfEncoding::Utf16Le).read_to_string(&mut text)?;
/// assert_eq!(text, "hi");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn select_reader<R: Read>(reader: R, encoding: UtfEncoding) -> UtfReader<R> {
    let decoder = match encoding {
        UtfEncoding::Unknown => return UtfReader::PassThrough(reader),
        UtfEncoding::Utf8 => UnitDecoder::Unicode(encoding_rs::UTF_8.new_decoder_with_bom_removal()),
        UtfEncoding::Utf16Be => {
            UnitDecoder::Unicode(encoding_rs::UTF_16BE.new_decoder_with_bom_removal())
        },
        UtfEncoding::Utf16Le => {
            UnitDecoder::Unicode(encoding_rs::UTF_16LE.new_decoder_with_bom_removal())
        },
        UtfEncoding::Utf32Be => UnitDecoder::Utf32(Utf32Decoder::new(true)),
        UtfEncoding::Utf32Le => UnitDecoder::Utf32(Utf32Decoder::new(false)),
    };
    UtfReader::Transcode(TranscodingReader::new(reader, decoder))
}

/// Reader returned by [`select_reader`].
pub enum UtfReader<R> {
    /// No decoding needed
    PassThrough(R),
    /// Transcoding to UTF-8
    Transcode(TranscodingReader<R>),
}

impl<R> UtfReader<R> {
    /// Unwrap the underlying byte source.
    ///
    /// Bytes already pulled into the decoder's buffers are lost.
    pub fn into_inner(self) -> R {
        match self {
            UtfReader::PassThrough(r) => r,
            UtfReader::Transcode(t) => t.inner,
        }
    }
}

impl<R: Read> Read for UtfReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            UtfReader::PassThrough(r) => r.read(buf),
            UtfReader::Transcode(t) => t.read(buf),
        }
    }
}

impl<R> std::fmt::Debug for UtfReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UtfReader::PassThrough(_) => f.write_str("UtfReader::PassThrough"),
            UtfReader::Transcode(t) => f
                .debug_struct("UtfReader::Transcode")
                .field("buffered_input", &(t.in_end - t.in_start))
                .field("buffered_output", &(t.out_len - t.out_pos))
                .field("finished", &t.finished)
                .finish(),
        }
    }
}

/// Outcome of one decode step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Progress {
    /// All input was consumed (and, on the last call, all state flushed)
    InputEmpty,
    /// Output buffer ran out of room
    OutputFull,
}

/// Code unit decoders behind [`TranscodingReader`].
enum UnitDecoder {
    /// UTF-8 and UTF-16 through encoding_rs
    Unicode(Decoder),
    /// UTF-32, which encoding_rs does not provide
    Utf32(Utf32Decoder),
}

impl UnitDecoder {
    fn decode(&mut self, src: &[u8], dst: &mut [u8], last: bool) -> (Progress, usize, usize) {
        match self {
            UnitDecoder::Unicode(decoder) => {
                let (result, read, written, _) = decoder.decode_to_utf8(src, dst, last);
                let progress = match result {
                    CoderResult::InputEmpty => Progress::InputEmpty,
                    CoderResult::OutputFull => Progress::OutputFull,
                };
                (progress, read, written)
            },
            UnitDecoder::Utf32(decoder) => decoder.decode(src, dst, last),
        }
    }
}

/// Streaming UTF-32 to UTF-8 decoder.
///
/// A unit split across two input chunks is carried in `pending`. A leading
/// U+FEFF is dropped; invalid scalar values and a truncated final unit
/// decode to U+FFFD.
struct Utf32Decoder {
    big_endian: bool,
    pending: [u8; 4],
    pending_len: usize,
    bom_checked: bool,
}

impl Utf32Decoder {
    fn new(big_endian: bool) -> Self {
        Self {
            big_endian,
            pending: [0; 4],
            pending_len: 0,
            bom_checked: false,
        }
    }

    fn decode(&mut self, src: &[u8], dst: &mut [u8], last: bool) -> (Progress, usize, usize) {
        let mut read = 0;
        let mut written = 0;

        loop {
            while self.pending_len < 4 && read < src.len() {
                self.pending[self.pending_len] = src[read];
                self.pending_len += 1;
                read += 1;
            }
            if self.pending_len < 4 {
                break;
            }

            let unit = if self.big_endian {
                u32::from_be_bytes(self.pending)
            } else {
                u32::from_le_bytes(self.pending)
            };

            if !self.bom_checked && unit == 0xFEFF {
                self.bom_checked = true;
                self.pending_len = 0;
                continue;
            }

            let ch = char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER);
            if dst.len() - written < ch.len_utf8() {
                return (Progress::OutputFull, read, written);
            }
            written += ch.encode_utf8(&mut dst[written..]).len();
            self.pending_len = 0;
            self.bom_checked = true;
        }

        if last && self.pending_len > 0 {
            let ch = char::REPLACEMENT_CHARACTER;
            if dst.len() - written < ch.len_utf8() {
                return (Progress::OutputFull, read, written);
            }
            written += ch.encode_utf8(&mut dst[written..]).len();
            self.pending_len = 0;
        }

        (Progress::InputEmpty, read, written)
    }
}

/// Pull-based transcoder from a byte source to UTF-8.
pub struct TranscodingReader<R> {
    inner: R,
    decoder: UnitDecoder,
    input: Box<[u8]>,
    in_start: usize,
    in_end: usize,
    output: Box<[u8]>,
    out_pos: usize,
    out_len: usize,
    eof: bool,
    finished: bool,
}

impl<R> TranscodingReader<R> {
    fn new(inner: R, decoder: UnitDecoder) -> Self {
        Self {
            inner,
            decoder,
            input: vec![0; INPUT_CHUNK].into_boxed_slice(),
            in_start: 0,
            in_end: 0,
            output: vec![0; OUTPUT_CHUNK].into_boxed_slice(),
            out_pos: 0,
            out_len: 0,
            eof: false,
            finished: false,
        }
    }
}

impl<R: Read> TranscodingReader<R> {
    /// Run one decode step into the (drained) output buffer.
    fn fill(&mut self) -> io::Result<()> {
        if self.in_start == self.in_end && !self.eof {
            let n = self.inner.read(&mut self.input)?;
            self.in_start = 0;
            self.in_end = n;
            self.eof = n == 0;
        }

        let last = self.eof;
        let (progress, read, written) =
            self.decoder
                .decode(&self.input[self.in_start..self.in_end], &mut self.output, last);
        self.in_start += read;
        self.out_pos = 0;
        self.out_len = written;

        if last && progress == Progress::InputEmpty && self.in_start == self.in_end {
            self.finished = true;
        }
        Ok(())
    }
}

impl<R: Read> Read for TranscodingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        while self.out_pos == self.out_len {
            if self.finished {
                return Ok(0);
            }
            self.fill()?;
        }

        let n = buf.len().min(self.out_len - self.out_pos);
        buf[..n].copy_from_slice(&self.output[self.out_pos..self.out_pos + n]);
        self.out_pos += n;
        Ok(n)
    }
}

/// Encode `text` in the requested form, prefixed with its BOM.
#[cfg(test)]
pub(crate) fn encode(text: &str, encoding: UtfEncoding) -> Vec<u8> {
    let mut out = encoding.bom().map(|kind| kind.as_bytes().to_vec()).unwrap_or_default();
    match encoding {
        UtfEncoding::Unknown | UtfEncoding::Utf8 => out.extend_from_slice(text.as_bytes()),
        UtfEncoding::Utf16Be => text
            .encode_utf16()
            .for_each(|u| out.extend_from_slice(&u.to_be_bytes())),
        UtfEncoding::Utf16Le => text
            .encode_utf16()
            .for_each(|u| out.extend_from_slice(&u.to_le_bytes())),
        UtfEncoding::Utf32Be => text
            .chars()
            .for_each(|c| out.extend_from_slice(&(c as u32).to_be_bytes())),
        UtfEncoding::Utf32Le => text
            .chars()
            .for_each(|c| out.extend_from_slice(&(c as u32).to_le_bytes())),
    }
    out
}
