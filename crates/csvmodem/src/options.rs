#![allow(clippy::struct_excessive_bools)]

use crate::error::OptionsError;

/// Configuration options for the streaming CSV parser.
///
/// Options are fixed for the lifetime of a parser. They are checked once by
/// [`StreamingParser::new`](crate::StreamingParser::new); nothing about them
/// is discovered mid-stream.
///
/// # Examples
///
/// ```rust
/// use csvmodem::{ParserOptions, StreamingParser};
///
/// let _parser = StreamingParser::new(ParserOptions {
///     delimiter: ';',
///     trim: true,
///     parse_numbers: true,
///     ..Default::default()
/// })
/// .unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParserOptions {
    /// The field separator.
    ///
    /// # Default
    ///
    /// `','`
    pub delimiter: char,

    /// Whether quoted fields may contain line terminators.
    ///
    /// When `false`, a CR or LF inside a quoted field ends the row as if the
    /// quote had been closed.
    ///
    /// # Default
    ///
    /// `true`
    pub multiline: bool,

    /// Whether `"` opens a quoted field. When `false`, quotes are ordinary
    /// characters.
    ///
    /// # Default
    ///
    /// `true`
    pub allow_quotes: bool,

    /// Drop data rows whose line was entirely blank.
    ///
    /// A line is blank only if it holds no characters at all; a line of
    /// whitespace or a lone `""` is kept as a row with one empty field.
    ///
    /// # Default
    ///
    /// `false`
    pub skip_empty_lines: bool,

    /// Convert numeric fields (`.` decimal separator, optional exponent,
    /// `Infinity`, `NaN`) to [`Value::Number`](crate::Value::Number).
    ///
    /// # Default
    ///
    /// `false`
    pub parse_numbers: bool,

    /// Convert the exact lowercase words `true` and `false` to
    /// [`Value::Boolean`](crate::Value::Boolean).
    ///
    /// # Default
    ///
    /// `false`
    pub parse_booleans: bool,

    /// Strip leading whitespace from data fields.
    ///
    /// # Default
    ///
    /// `false`
    pub ltrim: bool,

    /// Strip trailing whitespace from data fields.
    ///
    /// # Default
    ///
    /// `false`
    pub rtrim: bool,

    /// Shorthand for both `ltrim` and `rtrim`.
    ///
    /// # Default
    ///
    /// `false`
    pub trim: bool,

    /// The 1-based line holding the column names.
    ///
    /// Lines before it are discarded. `None` means the input has no header,
    /// unless `as_object` is set, which implies `Some(1)`.
    ///
    /// # Default
    ///
    /// `None`
    pub header_line: Option<usize>,

    /// Number of lines to discard right after the header line (or at the
    /// start of input when there is no header).
    ///
    /// # Default
    ///
    /// `0`
    pub skip_lines: usize,

    /// Emit data rows as [`Row::Object`](crate::Row::Object), keyed by the
    /// header's column names.
    ///
    /// # Default
    ///
    /// `false`
    pub as_object: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            multiline: true,
            allow_quotes: true,
            skip_empty_lines: false,
            parse_numbers: false,
            parse_booleans: false,
            ltrim: false,
            rtrim: false,
            trim: false,
            header_line: None,
            skip_lines: 0,
            as_object: false,
        }
    }
}

impl ParserOptions {
    /// Check the options for combinations the parser cannot honour.
    ///
    /// # Errors
    ///
    /// Returns an [`OptionsError`] if the delimiter is a line terminator,
    /// if it is `"` while quoting is enabled, or if `header_line` is zero.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if matches!(self.delimiter, '\r' | '\n') {
            return Err(OptionsError::LineTerminatorDelimiter(self.delimiter));
        }
        if self.allow_quotes && self.delimiter == '"' {
            return Err(OptionsError::QuoteDelimiter);
        }
        if self.header_line == Some(0) {
            return Err(OptionsError::ZeroHeaderLine);
        }
        Ok(())
    }

    /// The line at which the header is read, taking `as_object` into account.
    #[must_use]
    pub fn effective_header_line(&self) -> Option<usize> {
        match self.header_line {
            None if self.as_object => Some(1),
            line => line,
        }
    }
}

/// Options after validation, with implied settings folded in.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolvedOptions {
    pub(crate) delimiter: char,
    pub(crate) multiline: bool,
    pub(crate) allow_quotes: bool,
    pub(crate) skip_empty_lines: bool,
    pub(crate) header_line: Option<usize>,
    pub(crate) skip_lines: usize,
    pub(crate) as_object: bool,
}

impl ResolvedOptions {
    pub(crate) fn new(options: &ParserOptions) -> Result<Self, OptionsError> {
        options.validate()?;
        Ok(Self {
            delimiter: options.delimiter,
            multiline: options.multiline,
            allow_quotes: options.allow_quotes,
            skip_empty_lines: options.skip_empty_lines,
            header_line: options.effective_header_line(),
            skip_lines: options.skip_lines,
            as_object: options.as_object,
        })
    }

    /// First line that may be emitted as data.
    pub(crate) fn first_data_line(&self) -> usize {
        self.header_line
            .unwrap_or(0)
            .saturating_add(self.skip_lines)
            .saturating_add(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = ParserOptions::default();
        assert_eq!(options.delimiter, ',');
        assert!(options.multiline);
        assert!(options.allow_quotes);
        assert_eq!(options.header_line, None);
        assert_eq!(options.effective_header_line(), None);
    }

    #[test]
    fn object_mode_implies_first_line_header() {
        let options = ParserOptions {
            as_object: true,
            ..Default::default()
        };
        assert_eq!(options.effective_header_line(), Some(1));

        let options = ParserOptions {
            as_object: true,
            header_line: Some(3),
            ..Default::default()
        };
        assert_eq!(options.effective_header_line(), Some(3));
    }

    #[test]
    fn rejects_invalid_options() {
        let newline = ParserOptions {
            delimiter: '\n',
            ..Default::default()
        };
        assert_eq!(
            newline.validate(),
            Err(OptionsError::LineTerminatorDelimiter('\n'))
        );

        let quote = ParserOptions {
            delimiter: '"',
            ..Default::default()
        };
        assert_eq!(quote.validate(), Err(OptionsError::QuoteDelimiter));

        let quote_unquoted = ParserOptions {
            delimiter: '"',
            allow_quotes: false,
            ..Default::default()
        };
        assert_eq!(quote_unquoted.validate(), Ok(()));

        let zero = ParserOptions {
            header_line: Some(0),
            ..Default::default()
        };
        assert_eq!(zero.validate(), Err(OptionsError::ZeroHeaderLine));
    }

    #[test]
    fn first_data_line_accounts_for_header_and_skips() {
        let resolved = ResolvedOptions::new(&ParserOptions {
            header_line: Some(4),
            skip_lines: 1,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(resolved.first_data_line(), 6);

        let resolved = ResolvedOptions::new(&ParserOptions {
            skip_lines: 2,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(resolved.first_data_line(), 3);
    }

    #[test]
    fn first_data_line_saturates() {
        let resolved = ResolvedOptions::new(&ParserOptions {
            header_line: Some(usize::MAX),
            skip_lines: usize::MAX,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(resolved.first_data_line(), usize::MAX);
    }
}
