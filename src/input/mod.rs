//! Input boundary
//!
//! Values reach the engine only after parsing as integers inside the
//! configured bounds. Duplicates are not rejected here; the engine
//! absorbs them.

use std::ops::RangeInclusive;

use thiserror::Error;

/// Value type accepted from text input
pub type Value = i64;

/// Rejected input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Blank input
    #[error("value is empty")]
    Empty,

    /// Not parseable as an integer
    #[error("'{0}' is not an integer")]
    NotAnInteger(String),

    /// Parsed, but outside the allowed range
    #[error("{value} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Parsed value
        value: Value,
        /// Inclusive minimum
        min: Value,
        /// Inclusive maximum
        max: Value,
    },
}

/// Inclusive range of accepted values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueBounds {
    /// Smallest accepted value
    pub min: Value,
    /// Largest accepted value
    pub max: Value,
}

impl ValueBounds {
    /// Bounds covering `range`
    pub fn new(range: RangeInclusive<Value>) -> Self {
        Self {
            min: *range.start(),
            max: *range.end(),
        }
    }

    /// Accept every `i64`
    pub fn unbounded() -> Self {
        Self::new(Value::MIN..=Value::MAX)
    }

    /// Whether `value` lies inside the bounds
    pub fn contains(&self, value: Value) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl Default for ValueBounds {
    /// Four-digit values, which fit in a drawn node
    fn default() -> Self {
        Self::new(-9999..=9999)
    }
}

/// Parse one value
pub fn parse_value(raw: &str, bounds: ValueBounds) -> Result<Value, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    let value: Value = trimmed
        .parse()
        .map_err(|_| InputError::NotAnInteger(trimmed.to_string()))?;
    if !bounds.contains(value) {
        return Err(InputError::OutOfRange {
            value,
            min: bounds.min,
            max: bounds.max,
        });
    }
    Ok(value)
}

/// Parse a list of values separated by commas and/or whitespace
pub fn parse_values(raw: &str, bounds: ValueBounds) -> Result<Vec<Value>, InputError> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| parse_value(token, bounds))
        .collect()
}
