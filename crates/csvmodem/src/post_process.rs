#![allow(clippy::struct_excessive_bools)]

use crate::{ParserOptions, numbers::parse_number, value::Value};

/// Per-field trimming and type coercion.
///
/// Steps run in a fixed order: trim, then boolean coercion, then numeric
/// coercion. At most one coercion applies to a field, and empty fields are
/// never coerced.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PostProcessor {
    ltrim: bool,
    rtrim: bool,
    parse_booleans: bool,
    parse_numbers: bool,
}

impl PostProcessor {
    pub(crate) fn new(options: &ParserOptions) -> Self {
        Self {
            ltrim: options.ltrim || options.trim,
            rtrim: options.rtrim || options.trim,
            parse_booleans: options.parse_booleans,
            parse_numbers: options.parse_numbers,
        }
    }

    /// `true` when every step is disabled and fields pass through as text.
    pub(crate) fn is_noop(&self) -> bool {
        !(self.ltrim || self.rtrim || self.parse_booleans || self.parse_numbers)
    }

    pub(crate) fn apply(&self, field: String) -> Value {
        if field.is_empty() || self.is_noop() {
            return Value::String(field);
        }

        let trimmed = match (self.ltrim, self.rtrim) {
            (true, true) => field.trim(),
            (true, false) => field.trim_start(),
            (false, true) => field.trim_end(),
            (false, false) => field.as_str(),
        };

        if self.parse_booleans {
            match trimmed {
                "true" => return Value::Boolean(true),
                "false" => return Value::Boolean(false),
                _ => {}
            }
        }

        if self.parse_numbers {
            if let Some(n) = parse_number(trimmed) {
                return Value::Number(n);
            }
        }

        if trimmed.len() == field.len() {
            Value::String(field)
        } else {
            Value::String(trimmed.to_string())
        }
    }
}
