//! An incremental CSV row parser.
//!
//! Text goes in as chunks of any size; rows come out as soon as their line
//! terminator has been seen. The events produced are identical however the
//! input is sliced, including slices that split a `""` escape or a CRLF pair.
//!
//! ```rust
//! use csvmodem::{ParseEvent, ParserOptions, StreamingParser, Value};
//!
//! let mut parser = StreamingParser::new(ParserOptions {
//!     as_object: true,
//!     parse_numbers: true,
//!     parse_booleans: true,
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! let mut events: Vec<ParseEvent> = parser.feed("NAME,AGE,ALIVE\nJohn Sm").collect();
//! events.extend(parser.feed("ith,50,false\n"));
//! events.extend(parser.finish());
//!
//! let row = events[1].as_row().unwrap();
//! assert_eq!(row.get("NAME"), Some(&Value::from("John Smith")));
//! assert_eq!(row.get("AGE"), Some(&Value::Number(50.0)));
//! assert_eq!(row.get("ALIVE"), Some(&Value::Boolean(false)));
//! assert!(events[2].is_end());
//! ```

mod buffer;
mod chunk_utils;
mod error;
mod event;
mod numbers;
mod options;
mod parser;
mod post_process;
mod reader;
mod value;

#[cfg(test)]
mod tests;

pub use chunk_utils::{produce_chunks, produce_splits};
pub use error::{OptionsError, ReadError};
pub use event::ParseEvent;
pub use options::ParserOptions;
pub use parser::{ClosedStreamingParser, StreamingParser, StreamingParserIter};
pub use reader::RowReader;
pub use value::{Map, Row, Value};
