//! Events emitted by the streaming CSV parser.
//!
//! # Examples
//!
//! ```
//! use csvmodem::{ParseEvent, ParserOptions, Row, StreamingParser, Value};
//!
//! let mut parser = StreamingParser::new(ParserOptions {
//!     header_line: Some(1),
//!     ..Default::default()
//! })
//! .unwrap();
//! let mut events: Vec<_> = parser.feed("name\nAda\n").collect();
//! events.extend(parser.finish());
//! assert_eq!(
//!     events,
//!     vec![
//!         ParseEvent::Header {
//!             columns: vec!["name".to_string()],
//!         },
//!         ParseEvent::Row {
//!             line: 2,
//!             row: Row::Array(vec![Value::from("Ada")]),
//!         },
//!         ParseEvent::End,
//!     ]
//! );
//! ```
use crate::value::Row;

/// One outcome of feeding or finishing a [`StreamingParser`](crate::StreamingParser).
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
#[derive(Debug, Clone, PartialEq)]
pub enum ParseEvent {
    /// The header line was read. Emitted at most once, before any row.
    Header {
        /// Trimmed column names.
        columns: Vec<String>,
    },
    /// A data row completed at `line`. Lines are 1-based and count rows,
    /// blank and skipped ones included; a quoted field spanning several
    /// physical lines does not advance the count.
    Row {
        /// Line the row completed on.
        line: usize,
        /// The row's fields, post-processed.
        row: Row,
    },
    /// Input is exhausted. Always the last event of a finished parser.
    End,
}

impl ParseEvent {
    /// Returns the row if this is [`ParseEvent::Row`].
    #[must_use]
    pub fn as_row(&self) -> Option<&Row> {
        match self {
            Self::Row { row, .. } => Some(row),
            _ => None,
        }
    }

    /// Consumes the event, returning the row if this is [`ParseEvent::Row`].
    #[must_use]
    pub fn into_row(self) -> Option<Row> {
        match self {
            Self::Row { row, .. } => Some(row),
            _ => None,
        }
    }

    /// Returns the column names if this is [`ParseEvent::Header`].
    #[must_use]
    pub fn as_header(&self) -> Option<&[String]> {
        match self {
            Self::Header { columns } => Some(columns),
            _ => None,
        }
    }

    /// Returns `true` if the event is [`End`].
    ///
    /// [`End`]: ParseEvent::End
    #[must_use]
    pub fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }
}
