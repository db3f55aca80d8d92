//! Polling configuration
//!
//! Tunable timing parameters for the polling loop and the event
//! constructors that depend on them.  Values can be loaded from JSON
//! (e.g. a provisioning blob) and are validated before use.

use embedded_hal::digital::InputPin;
use serde::{Deserialize, Serialize};

use crate::clock::ClockHandle;
use crate::error::{Error, Result};
use crate::event::{DEFAULT_TIMER_PERIOD_MS, Event};
use crate::source::{DEFAULT_DEBOUNCE_MS, Debouncer};

/// Longest debounce settle time accepted (milliseconds).
pub const MAX_DEBOUNCE_MS: u32 = 1000;

/// Core polling configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Sleep between poll passes (milliseconds).  0 = spin.
    pub tick_delay_ms: u32,
    /// Period for timers built with [`PollConfig::timer`] (milliseconds).
    pub default_timer_period_ms: u32,
    /// Settle time for debouncers built with [`PollConfig::debounce`].
    pub debounce_interval_ms: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            tick_delay_ms: 0,
            default_timer_period_ms: DEFAULT_TIMER_PERIOD_MS as u32,
            debounce_interval_ms: DEFAULT_DEBOUNCE_MS as u32,
        }
    }
}

impl PollConfig {
    /// Reject values that would make the loop misbehave.
    pub fn validate(&self) -> Result<()> {
        if self.default_timer_period_ms == 0 {
            return Err(Error::Config("default_timer_period_ms must be non-zero"));
        }
        if self.debounce_interval_ms > MAX_DEBOUNCE_MS {
            return Err(Error::Config("debounce_interval_ms above 1000"));
        }
        Ok(())
    }

    /// Parse and validate a JSON config.  Missing fields take defaults.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let config: Self =
            serde_json::from_slice(bytes).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }

    /// Timer event using the configured default period.
    pub fn timer(&self, name: &'static str) -> Event {
        Event::timer(name, u64::from(self.default_timer_period_ms))
    }

    /// Debouncer using the configured settle time.
    pub fn debounce<P: InputPin>(&self, pin: P, clock: ClockHandle) -> Debouncer<P> {
        Debouncer::with_interval(pin, clock, u64::from(self.debounce_interval_ms))
    }
}
