//! Observed values.
//!
//! An event watches either a boolean level (a pin, a predicate) or a
//! duration (a timer), so the last two observations are kept as a small
//! tagged union rather than a loosely typed number.

use core::fmt;

/// A single observation made by an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    /// Digital level or predicate result.
    Bool(bool),
    /// Generic numeric reading from a collaborator source.
    Int(i64),
    /// Elapsed milliseconds (timer events).
    Millis(u64),
}

impl Value {
    /// Boolean interpretation used by level and edge detection.
    /// Numeric readings are truthy when non-zero.
    pub const fn is_truthy(self) -> bool {
        match self {
            Self::Bool(b) => b,
            Self::Int(n) => n != 0,
            Self::Millis(ms) => ms != 0,
        }
    }
}

impl Default for Value {
    /// `Bool(false)`: the value every event holds before its first tick.
    fn default() -> Self {
        Self::Bool(false)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Millis(ms) => write!(f, "{ms}ms"),
        }
    }
}
