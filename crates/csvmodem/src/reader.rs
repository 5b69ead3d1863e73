//! Pull-based adapter that drives a [`StreamingParser`] from an
//! [`std::io::Read`] source.
//!
//! The reader owns the transport concerns the parser leaves out: reading
//! bytes, decoding them as UTF-8 across read boundaries, and surfacing I/O
//! failures.
//!
//! # Examples
//!
//! ```
//! use csvmodem::{ParseEvent, ParserOptions, RowReader};
//!
//! let input: &[u8] = b"id,name\n1,Ada\n2,Grace\n";
//! let reader = RowReader::new(
//!     input,
//!     ParserOptions {
//!         header_line: Some(1),
//!         ..Default::default()
//!     },
//! )
//! .unwrap();
//! let rows = reader
//!     .filter_map(|event| event.unwrap().into_row())
//!     .count();
//! assert_eq!(rows, 2);
//! ```
use std::{
    io::{ErrorKind, Read},
    mem,
};

use bstr::ByteSlice;
use log::{debug, trace};

use crate::{
    OptionsError, ParseEvent, ParserOptions, ReadError,
    parser::{ClosedStreamingParser, StreamingParser},
};

const DEFAULT_CAPACITY: usize = 8 * 1024;

/// Incremental UTF-8 decoder that holds back a code point split across
/// reads. Invalid sequences decode to U+FFFD.
#[derive(Debug, Default)]
struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    fn decode(&mut self, bytes: &[u8], last: bool, out: &mut String) {
        self.pending.extend_from_slice(bytes);
        let mut consumed = 0;
        for chunk in ByteSlice::utf8_chunks(self.pending.as_slice()) {
            out.push_str(chunk.valid());
            consumed += chunk.valid().len();
            let invalid = chunk.invalid();
            if invalid.is_empty() {
                continue;
            }
            if chunk.incomplete() && !last {
                trace!("holding back {} bytes of a split code point", invalid.len());
                break;
            }
            out.push(char::REPLACEMENT_CHARACTER);
            consumed += invalid.len();
        }
        self.pending.drain(..consumed);
    }
}

enum Stage {
    Open(StreamingParser),
    Closed(ClosedStreamingParser),
    Done,
}

/// Iterator over the [`ParseEvent`]s of a CSV byte source.
///
/// Reads happen lazily, only when the parser has no complete row left. An
/// I/O error (other than [`ErrorKind::Interrupted`], which is retried) is
/// yielded once and ends the iteration; rows yielded before it stand.
pub struct RowReader<R> {
    source: R,
    buf: Box<[u8]>,
    decoder: Utf8Decoder,
    text: String,
    stage: Stage,
}

impl<R: Read> RowReader<R> {
    /// Create a reader with an 8 KiB read buffer.
    ///
    /// # Errors
    ///
    /// Returns an [`OptionsError`] if `options` are invalid.
    pub fn new(source: R, options: ParserOptions) -> Result<Self, OptionsError> {
        Self::with_capacity(DEFAULT_CAPACITY, source, options)
    }

    /// Create a reader that requests up to `capacity` bytes per read.
    ///
    /// # Errors
    ///
    /// Returns an [`OptionsError`] if `options` are invalid.
    pub fn with_capacity(
        capacity: usize,
        source: R,
        options: ParserOptions,
    ) -> Result<Self, OptionsError> {
        Ok(Self {
            source,
            buf: vec![0; capacity.max(1)].into_boxed_slice(),
            decoder: Utf8Decoder::default(),
            text: String::new(),
            stage: Stage::Open(StreamingParser::new(options)?),
        })
    }

    /// The captured header, if one has been read.
    #[must_use]
    pub fn header(&self) -> Option<&[String]> {
        match &self.stage {
            Stage::Open(parser) => parser.header(),
            Stage::Closed(closed) => closed.header(),
            Stage::Done => None,
        }
    }

    /// Consume the reader, returning the underlying source.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.source
    }
}

impl<R: Read> Iterator for RowReader<R> {
    type Item = Result<ParseEvent, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.stage {
                Stage::Open(parser) => {
                    if let Some(event) = parser.next_event() {
                        return Some(Ok(event));
                    }
                    match self.source.read(&mut self.buf) {
                        Ok(0) => {
                            self.text.clear();
                            self.decoder.decode(&[], true, &mut self.text);
                            parser.feed_str(&self.text);
                            if let Stage::Open(parser) = mem::replace(&mut self.stage, Stage::Done)
                            {
                                self.stage = Stage::Closed(parser.finish());
                            }
                        }
                        Ok(n) => {
                            self.text.clear();
                            self.decoder.decode(&self.buf[..n], false, &mut self.text);
                            parser.feed_str(&self.text);
                        }
                        Err(err) if err.kind() == ErrorKind::Interrupted => {}
                        Err(err) => {
                            debug!("source failed, ending stream: {err}");
                            self.stage = Stage::Done;
                            return Some(Err(err.into()));
                        }
                    }
                }
                Stage::Closed(closed) => {
                    if let Some(event) = closed.next() {
                        return Some(Ok(event));
                    }
                    self.stage = Stage::Done;
                }
                Stage::Done => return None,
            }
        }
    }
}
