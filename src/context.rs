//! Auxiliary notification data.
//!
//! Each observable carries a small, immutable key→value map that is handed
//! verbatim to every observer it notifies, typically the handle of an
//! indicator LED.  The value kinds are a closed set so observers can match
//! on them instead of guessing.

use core::fmt;

use heapless::LinearMap;

use crate::error::{Error, Result};
use crate::indicator::IndicatorHandle;

/// Maximum number of entries in one [`Context`] (stack-allocated).
pub const CONTEXT_CAPACITY: usize = 8;

/// Key under which the reference observer looks for its indicator.
pub const INDICATOR_KEY: &str = "led";

/// One context entry.
#[derive(Clone)]
pub enum ContextValue {
    Indicator(IndicatorHandle),
    Int(i64),
    Bool(bool),
    Text(&'static str),
}

impl ContextValue {
    pub fn as_indicator(&self) -> Option<&IndicatorHandle> {
        match self {
            Self::Indicator(handle) => Some(handle),
            _ => None,
        }
    }
}

impl fmt::Debug for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Indicator(_) => write!(f, "Indicator(..)"),
            Self::Int(n) => write!(f, "Int({n})"),
            Self::Bool(b) => write!(f, "Bool({b})"),
            Self::Text(s) => write!(f, "Text({s:?})"),
        }
    }
}

impl From<IndicatorHandle> for ContextValue {
    fn from(handle: IndicatorHandle) -> Self {
        Self::Indicator(handle)
    }
}

impl From<i64> for ContextValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for ContextValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&'static str> for ContextValue {
    fn from(s: &'static str) -> Self {
        Self::Text(s)
    }
}

/// Ordered, fixed-capacity map of context entries.
#[derive(Clone, Debug, Default)]
pub struct Context {
    entries: LinearMap<&'static str, ContextValue, CONTEXT_CAPACITY>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, replacing any earlier value under the same key.
    pub fn with(mut self, key: &'static str, value: impl Into<ContextValue>) -> Result<Self> {
        self.entries
            .insert(key, value.into())
            .map_err(|_| Error::ContextFull)?;
        Ok(self)
    }

    /// Shorthand for a context holding only an indicator under [`INDICATOR_KEY`].
    pub fn with_indicator(indicator: IndicatorHandle) -> Self {
        let mut entries = LinearMap::new();
        // An empty map always has room for one entry.
        let _ = entries.insert(INDICATOR_KEY, ContextValue::Indicator(indicator));
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.entries.get(key)
    }

    /// The indicator stored under `key`, if that entry is an indicator.
    pub fn indicator(&self, key: &str) -> Option<&IndicatorHandle> {
        self.get(key).and_then(ContextValue::as_indicator)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ContextValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }
}
