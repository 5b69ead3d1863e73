//! Field and row types.
//!
//! A parsed field is a [`Value`]: text unless post-processing coerced it to a
//! number or a boolean. A [`Row`] is either positional or keyed by the
//! header's column names.

use core::fmt;

use indexmap::IndexMap;

/// Column name to field value, in header order.
pub type Map = IndexMap<String, Value>;

/// A single field value.
///
/// # Examples
///
/// ```
/// use csvmodem::Value;
///
/// assert_eq!(Value::from("a").as_str(), Some("a"));
/// assert_eq!(Value::from(1.5).as_f64(), Some(1.5));
/// assert_eq!(Value::from(true).to_string(), "true");
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Field text, after trimming.
    String(String),
    /// A field recognized as numeric.
    Number(f64),
    /// A field that was exactly `true` or `false`.
    Boolean(bool),
}

impl Default for Value {
    fn default() -> Self {
        Self::String(String::new())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl Value {
    /// Returns the text if this is [`Value::String`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this is [`Value::Number`].
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean if this is [`Value::Boolean`].
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns `true` if this is an empty [`Value::String`].
    #[must_use]
    pub fn is_empty_string(&self) -> bool {
        matches!(self, Self::String(s) if s.is_empty())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) if n.is_nan() => f.write_str("NaN"),
            Self::Number(n) if n.is_infinite() => {
                f.write_str(if n.is_sign_negative() { "-Infinity" } else { "Infinity" })
            }
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// One data row.
///
/// Array rows keep every field in input order and may be ragged. Object rows
/// hold one entry per header column that had a field in this row.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Clone, Debug, PartialEq)]
pub enum Row {
    /// Fields by position.
    Array(Vec<Value>),
    /// Fields keyed by header column, in header order.
    Object(Map),
}

impl Row {
    /// Number of fields (array) or entries (object).
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Array(fields) => fields.len(),
            Self::Object(map) => map.len(),
        }
    }

    /// Returns `true` if the row holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a field by position. For object rows the position follows
    /// header order.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Self::Array(fields) => fields.get(index),
            Self::Object(map) => map.get_index(index).map(|(_, v)| v),
        }
    }

    /// Look up a field by column name. Always `None` for array rows.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        match self {
            Self::Array(_) => None,
            Self::Object(map) => map.get(column),
        }
    }

    /// Returns the positional fields if this is [`Row::Array`].
    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(fields) => Some(fields),
            Self::Object(_) => None,
        }
    }

    /// Returns the mapping if this is [`Row::Object`].
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Array(_) => None,
            Self::Object(map) => Some(map),
        }
    }
}

impl From<Vec<Value>> for Row {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Row {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}
