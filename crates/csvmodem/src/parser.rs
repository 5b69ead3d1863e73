//! The streaming CSV parser implementation.
//!
//! `StreamingParser` accepts text in arbitrarily sized chunks and emits a
//! [`ParseEvent`] for every row that a chunk completes. The emitted events do
//! not depend on where chunk boundaries fall: a quote at the very end of a
//! chunk, or a CRLF pair split across two chunks, is resolved only once the
//! next chunk (or [`StreamingParser::finish`]) arrives.
//!
//! # Examples
//!
//! ```rust
//! use csvmodem::{ParserOptions, Row, StreamingParser, Value};
//!
//! let mut parser = StreamingParser::new(ParserOptions::default()).unwrap();
//! let mut rows = Vec::new();
//! for chunk in ["a,\"b", "\"\"c\"\r", "\nd,e"] {
//!     rows.extend(parser.feed(chunk).filter_map(|e| e.into_row()));
//! }
//! rows.extend(parser.finish().filter_map(|e| e.into_row()));
//! assert_eq!(
//!     rows,
//!     vec![
//!         Row::Array(vec![Value::from("a"), Value::from("b\"c")]),
//!         Row::Array(vec![Value::from("d"), Value::from("e")]),
//!     ]
//! );
//! ```

use core::mem;

use log::{debug, trace};

use crate::{
    buffer::Buffer,
    error::OptionsError,
    event::ParseEvent,
    options::{ParserOptions, ResolvedOptions},
    post_process::PostProcessor,
    value::{Map, Row, Value},
};

const BYTE_ORDER_MARK: char = '\u{feff}';
const QUOTE: char = '"';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    Unquoted,
    Quoted,
}

/// Result of running the tokenizer over buffered input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// A row terminator (or the end of input) was reached; `fields` holds the
    /// whole row.
    RowComplete,
    /// Buffered input is exhausted, or the next decision needs a character
    /// that has not arrived yet.
    NeedMore,
}

/// The streaming CSV parser.
///
/// Feed text with [`feed`](Self::feed) and drain the returned iterator; call
/// [`finish`](Self::finish) once the source is exhausted to flush the last
/// row. A parser serves exactly one input stream.
#[derive(Debug)]
pub struct StreamingParser {
    source: Buffer,
    end_of_input: bool,

    /// Tokenizer state
    state: FieldState,
    field: String,
    fields: Vec<String>,
    /// Set once any character of the current row has been consumed. A row
    /// completed without it was a blank line.
    row_started: bool,
    last_line_end_cr: bool,
    bom_checked: bool,

    /// Row assembler state
    line: usize,
    header: Option<Vec<String>>,

    options: ResolvedOptions,
    post: PostProcessor,
}

/// Iterator over the events completed by one [`StreamingParser::feed`] call.
///
/// Dropping it early is harmless: undrained input stays buffered and is
/// parsed on the next `feed`.
#[derive(Debug)]
pub struct StreamingParserIter<'p> {
    parser: &'p mut StreamingParser,
}

impl Iterator for StreamingParserIter<'_> {
    type Item = ParseEvent;

    fn next(&mut self) -> Option<Self::Item> {
        self.parser.next_event()
    }
}

/// A `StreamingParser` that has been closed to further input.
///
/// Returned by [`StreamingParser::finish`]. Yields the remaining rows, then
/// exactly one [`ParseEvent::End`].
#[derive(Debug)]
pub struct ClosedStreamingParser {
    parser: StreamingParser,
    ended: bool,
}

impl ClosedStreamingParser {
    /// The captured header, if any.
    #[must_use]
    pub fn header(&self) -> Option<&[String]> {
        self.parser.header()
    }
}

impl Iterator for ClosedStreamingParser {
    type Item = ParseEvent;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.parser.next_event() {
            return Some(event);
        }
        if self.ended {
            return None;
        }
        self.ended = true;
        Some(ParseEvent::End)
    }
}

impl StreamingParser {
    /// Creates a new `StreamingParser` with the given options.
    ///
    /// # Errors
    ///
    /// Returns an [`OptionsError`] if the options are inconsistent, see
    /// [`ParserOptions::validate`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use csvmodem::{OptionsError, ParserOptions, StreamingParser};
    ///
    /// assert!(StreamingParser::new(ParserOptions::default()).is_ok());
    /// assert_eq!(
    ///     StreamingParser::new(ParserOptions {
    ///         header_line: Some(0),
    ///         ..Default::default()
    ///     })
    ///     .unwrap_err(),
    ///     OptionsError::ZeroHeaderLine,
    /// );
    /// ```
    pub fn new(options: ParserOptions) -> Result<Self, OptionsError> {
        let resolved = ResolvedOptions::new(&options)?;
        Ok(Self {
            source: Buffer::new(),
            end_of_input: false,

            state: FieldState::Unquoted,
            field: String::new(),
            fields: Vec::new(),
            row_started: false,
            last_line_end_cr: false,
            bom_checked: false,

            line: 1,
            header: None,

            options: resolved,
            post: PostProcessor::new(&options),
        })
    }

    /// Feeds a chunk of CSV text into the parser.
    ///
    /// The returned iterator yields every event the buffered input now
    /// completes; one chunk may complete many rows, or none.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use csvmodem::{ParserOptions, StreamingParser};
    /// let mut parser = StreamingParser::new(ParserOptions::default()).unwrap();
    /// assert_eq!(parser.feed("a,b\nc").count(), 1);
    /// assert_eq!(parser.feed(",d\n").count(), 1);
    /// ```
    pub fn feed(&mut self, chunk: &str) -> StreamingParserIter<'_> {
        self.feed_str(chunk);
        StreamingParserIter { parser: self }
    }

    /// Marks the end of input and returns a closed parser to drain the
    /// remaining events.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use csvmodem::{ParseEvent, ParserOptions, Row, StreamingParser, Value};
    ///
    /// let mut parser = StreamingParser::new(ParserOptions::default()).unwrap();
    /// assert_eq!(parser.feed("x,y").count(), 0);
    /// let events: Vec<_> = parser.finish().collect();
    /// assert_eq!(
    ///     events,
    ///     vec![
    ///         ParseEvent::Row {
    ///             line: 1,
    ///             row: Row::Array(vec![Value::from("x"), Value::from("y")]),
    ///         },
    ///         ParseEvent::End,
    ///     ]
    /// );
    /// ```
    #[must_use]
    pub fn finish(mut self) -> ClosedStreamingParser {
        self.close();
        ClosedStreamingParser {
            parser: self,
            ended: false,
        }
    }

    /// The captured header, once its line has been parsed.
    #[must_use]
    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    /// The line number the next completed row will get.
    #[must_use]
    pub fn current_line(&self) -> usize {
        self.line
    }

    pub(crate) fn feed_str(&mut self, mut chunk: &str) {
        if !self.bom_checked && !chunk.is_empty() {
            self.bom_checked = true;
            if let Some(rest) = chunk.strip_prefix(BYTE_ORDER_MARK) {
                trace!("skipping byte order mark");
                chunk = rest;
            }
        }
        self.source.push(chunk);
    }

    pub(crate) fn close(&mut self) {
        if self.source.is_empty() {
            debug!("end of input at line {}", self.line);
        } else {
            debug!(
                "end of input at line {} with {} bytes buffered",
                self.line,
                self.source.remaining()
            );
        }
        self.end_of_input = true;
    }

    /// Drive the parser until it either
    ///   * produces one `ParseEvent`, or
    ///   * needs more input (or has reached the end of input).
    ///
    /// Rows that produce no event (preamble, skipped and dropped empty rows)
    /// are consumed in the same call.
    pub(crate) fn next_event(&mut self) -> Option<ParseEvent> {
        loop {
            match self.lex_row() {
                Step::NeedMore => return None,
                Step::RowComplete => {
                    if let Some(event) = self.commit_row() {
                        return Some(event);
                    }
                }
            }
        }
    }

    // --------------------------------------------------------------------------------------------
    // Field tokenizer
    // --------------------------------------------------------------------------------------------

    fn lex_row(&mut self) -> Step {
        loop {
            let Some(c) = self.source.peek() else {
                if self.end_of_input && self.row_started {
                    self.end_field();
                    return Step::RowComplete;
                }
                return Step::NeedMore;
            };

            if (c == '\r' || c == '\n')
                && (self.state == FieldState::Unquoted || !self.options.multiline)
            {
                self.source.advance(c);
                if c == '\n' && self.last_line_end_cr {
                    self.last_line_end_cr = false;
                    continue;
                }
                self.last_line_end_cr = c == '\r';
                self.state = FieldState::Unquoted;
                self.end_field();
                return Step::RowComplete;
            }
            self.last_line_end_cr = false;

            match self.state {
                FieldState::Quoted if c == QUOTE => match self.source.peek_second() {
                    None if !self.end_of_input => {
                        trace!("quote at end of buffered input, waiting for more");
                        return Step::NeedMore;
                    }
                    Some(QUOTE) => {
                        self.source.advance(QUOTE);
                        self.source.advance(QUOTE);
                        self.field.push(QUOTE);
                    }
                    _ => {
                        self.source.advance(QUOTE);
                        self.state = FieldState::Unquoted;
                    }
                },
                FieldState::Quoted => {
                    self.source.advance(c);
                    self.field.push(c);
                }
                FieldState::Unquoted => {
                    self.source.advance(c);
                    self.row_started = true;
                    if c == self.options.delimiter {
                        self.end_field();
                    } else if c == QUOTE && self.options.allow_quotes && self.field.is_empty() {
                        self.state = FieldState::Quoted;
                    } else {
                        self.field.push(c);
                    }
                }
            }
        }
    }

    fn end_field(&mut self) {
        let field = mem::take(&mut self.field);
        self.fields.push(field);
    }

    // --------------------------------------------------------------------------------------------
    // Row assembler
    // --------------------------------------------------------------------------------------------

    fn commit_row(&mut self) -> Option<ParseEvent> {
        let line = self.line;
        self.line += 1;
        let fields = mem::take(&mut self.fields);
        let is_empty = !mem::replace(&mut self.row_started, false);

        if let Some(header_line) = self.options.header_line {
            if line < header_line {
                debug!("discarding line {line} before header line {header_line}");
                return None;
            }
            if line == header_line {
                let columns: Vec<String> = fields
                    .iter()
                    .map(|column| column.trim().to_string())
                    .collect();
                debug!("captured header at line {line}: {columns:?}");
                self.header = Some(columns.clone());
                return Some(ParseEvent::Header { columns });
            }
        }

        if line < self.options.first_data_line() {
            debug!("skipping line {line}");
            return None;
        }

        if is_empty && self.options.skip_empty_lines {
            trace!("dropping empty line {line}");
            return None;
        }

        let row = self.assemble_row(fields);
        Some(ParseEvent::Row { line, row })
    }

    fn assemble_row(&self, fields: Vec<String>) -> Row {
        match self.header.as_deref() {
            Some(header) if self.options.as_object => {
                let mut map = Map::with_capacity(header.len().min(fields.len()));
                for (column, field) in header.iter().zip(fields) {
                    map.insert(column.clone(), self.post.apply(field));
                }
                #[cfg(any(test, feature = "fuzzing"))]
                assert!(
                    map.len() <= header.len(),
                    "Internal error: object row wider than its header"
                );
                Row::Object(map)
            }
            _ if self.post.is_noop() => Row::Array(fields.into_iter().map(Value::String).collect()),
            _ => Row::Array(fields.into_iter().map(|f| self.post.apply(f)).collect()),
        }
    }
}
