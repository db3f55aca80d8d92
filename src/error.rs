//! Unified error types for the polling core.
//!
//! The dispatch path itself (`check`, `register`, `deregister`, `notify`)
//! never fails.  What can fail is setup: building a notification context
//! past its fixed capacity, or loading a configuration that does not make
//! sense.  All variants are `Copy` so they can be passed around without
//! allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible setup operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The notification context already holds `CONTEXT_CAPACITY` entries.
    ContextFull,
    /// Configuration is invalid or could not be parsed.
    Config(&'static str),
    /// A collaborator pin could not be accessed.
    Pin(PinError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContextFull => write!(f, "context: capacity exhausted"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Pin(e) => write!(f, "pin: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Pin errors
// ---------------------------------------------------------------------------

/// Collapsed form of an `embedded_hal::digital::ErrorKind`.
///
/// Source and indicator adapters log these and carry on; they surface as
/// values only through the adapters' `last_error()` accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinError {
    /// Reading an input level failed.
    ReadFailed,
    /// Driving an output level failed.
    WriteFailed,
}

impl fmt::Display for PinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed => write!(f, "GPIO read failed"),
            Self::WriteFailed => write!(f, "GPIO write failed"),
        }
    }
}

impl From<PinError> for Error {
    fn from(e: PinError) -> Self {
        Self::Pin(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
