use thiserror::Error;

/// Configuration rejected by [`StreamingParser::new`](crate::StreamingParser::new).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OptionsError {
    /// The delimiter is CR or LF.
    #[error("delimiter {0:?} is a line terminator")]
    LineTerminatorDelimiter(char),
    /// The delimiter is the quote character while quoting is enabled.
    #[error("delimiter '\"' conflicts with quoting; disable `allow_quotes` to use it")]
    QuoteDelimiter,
    /// `header_line` is `Some(0)`.
    #[error("header line numbers start at 1")]
    ZeroHeaderLine,
}

/// Failure surfaced by [`RowReader`](crate::RowReader).
///
/// Errors from the underlying source are forwarded unchanged and end the
/// stream: rows already yielded stand, no further rows follow.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The source failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
