//! Readable sources watched by level and edge events.
//!
//! A source is anything that can report a current [`Value`].  Some sources
//! (a debounced button) need a step to advance their internal state before
//! the value is trustworthy; those implement [`Updatable`].  Which kind a
//! source is gets decided once, when the [`Source`] is built, instead of
//! being probed on every tick.
//!
//! ```text
//!   GPIO ──▶ PinSource ─────────────▶ Source::Plain    ──┐
//!   GPIO ──▶ Debouncer ─(update)────▶ Source::Updating ──┼──▶ Event
//!   closure ─▶ FnSource ────────────▶ Source::Plain    ──┘
//! ```

use embedded_hal::digital::InputPin;
use log::warn;

use crate::clock::{Clock, ClockHandle};
use crate::error::PinError;
use crate::value::Value;

/// Default settle time for [`Debouncer`], in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 10;

// ───────────────────────────────────────────────────────────────
// Capability traits
// ───────────────────────────────────────────────────────────────

/// Something with a current value.
pub trait Readable {
    fn read(&mut self) -> Value;
}

/// A readable that must be stepped before each read (debounce advancement).
pub trait Updatable: Readable {
    fn update(&mut self);
}

/// A source with its capability resolved at construction.
pub enum Source {
    /// Read directly.
    Plain(Box<dyn Readable>),
    /// `update()` then read.
    Updating(Box<dyn Updatable>),
}

impl Source {
    pub fn plain(readable: impl Readable + 'static) -> Self {
        Self::Plain(Box::new(readable))
    }

    pub fn updating(updatable: impl Updatable + 'static) -> Self {
        Self::Updating(Box::new(updatable))
    }

    /// Arbitrary boolean predicate, polled once per tick.
    pub fn from_fn(predicate: impl FnMut() -> bool + 'static) -> Self {
        Self::plain(FnSource::new(predicate))
    }

    /// Take one observation, stepping the source first if it needs it.
    pub fn sample(&mut self) -> Value {
        match self {
            Self::Plain(r) => r.read(),
            Self::Updating(u) => {
                u.update();
                u.read()
            }
        }
    }

    pub fn is_updating(&self) -> bool {
        matches!(self, Self::Updating(_))
    }
}

impl core::fmt::Debug for Source {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Plain(_) => write!(f, "Source::Plain"),
            Self::Updating(_) => write!(f, "Source::Updating"),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Closure source
// ───────────────────────────────────────────────────────────────

/// Wraps a `FnMut() -> bool` predicate.
pub struct FnSource<F> {
    predicate: F,
}

impl<F: FnMut() -> bool> FnSource<F> {
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<F: FnMut() -> bool> Readable for FnSource<F> {
    fn read(&mut self) -> Value {
        Value::Bool((self.predicate)())
    }
}

// ───────────────────────────────────────────────────────────────
// Raw GPIO source
// ───────────────────────────────────────────────────────────────

fn read_level<P: InputPin>(pin: &mut P, active_low: bool) -> Result<bool, PinError> {
    pin.is_high()
        .map(|high| high != active_low)
        .map_err(|_| PinError::ReadFailed)
}

/// Undebounced digital input.
///
/// A failed read is logged and the last good level is reported instead,
/// so the core never sees a transient hardware hiccup as an edge.
pub struct PinSource<P> {
    pin: P,
    active_low: bool,
    last: bool,
    last_error: Option<PinError>,
}

impl<P: InputPin> PinSource<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            active_low: false,
            last: false,
            last_error: None,
        }
    }

    /// Report `true` while the pin is electrically low (pull-up buttons).
    #[must_use]
    pub fn active_low(mut self) -> Self {
        self.active_low = true;
        self
    }

    /// Error from the most recent read, if it failed.
    pub fn last_error(&self) -> Option<PinError> {
        self.last_error
    }
}

impl<P: InputPin> Readable for PinSource<P> {
    fn read(&mut self) -> Value {
        match read_level(&mut self.pin, self.active_low) {
            Ok(level) => {
                self.last = level;
                self.last_error = None;
            }
            Err(e) => {
                warn!("PinSource: {}, holding last level {}", e, self.last);
                self.last_error = Some(e);
            }
        }
        Value::Bool(self.last)
    }
}

// ───────────────────────────────────────────────────────────────
// Debounced GPIO source
// ───────────────────────────────────────────────────────────────

/// Time-based debouncer for a noisy digital input.
///
/// The raw level must hold unchanged for `interval_ms` before the
/// debounced value follows it.  Call [`update`](Updatable::update) once
/// per tick; [`Source::Updating`] does that automatically.
pub struct Debouncer<P> {
    pin: P,
    clock: ClockHandle,
    interval_ms: u64,
    active_low: bool,
    stable: bool,
    unstable: bool,
    bounce_at_ms: u64,
    changed: bool,
    last_error: Option<PinError>,
}

impl<P: InputPin> Debouncer<P> {
    /// Debounce with the default 10 ms settle time.
    pub fn new(pin: P, clock: ClockHandle) -> Self {
        Self::with_interval(pin, clock, DEFAULT_DEBOUNCE_MS)
    }

    pub fn with_interval(pin: P, clock: ClockHandle, interval_ms: u64) -> Self {
        let mut debouncer = Self {
            pin,
            bounce_at_ms: clock.now_ms(),
            clock,
            interval_ms,
            active_low: false,
            stable: false,
            unstable: false,
            changed: false,
            last_error: None,
        };
        debouncer.seed();
        debouncer
    }

    /// Report `true` while the pin is electrically low.  Re-seeds the state.
    #[must_use]
    pub fn active_low(mut self) -> Self {
        self.active_low = true;
        self.seed();
        self
    }

    fn seed(&mut self) {
        let level = self.sample_raw().unwrap_or(false);
        self.stable = level;
        self.unstable = level;
        self.changed = false;
    }

    fn sample_raw(&mut self) -> Option<bool> {
        match read_level(&mut self.pin, self.active_low) {
            Ok(level) => {
                self.last_error = None;
                Some(level)
            }
            Err(e) => {
                warn!("Debouncer: {}, keeping state", e);
                self.last_error = Some(e);
                None
            }
        }
    }

    /// Current debounced level.
    pub fn value(&self) -> bool {
        self.stable
    }

    /// The last `update()` moved the debounced level from low to high.
    pub fn rose(&self) -> bool {
        self.changed && self.stable
    }

    /// The last `update()` moved the debounced level from high to low.
    pub fn fell(&self) -> bool {
        self.changed && !self.stable
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn last_error(&self) -> Option<PinError> {
        self.last_error
    }
}

impl<P: InputPin> Readable for Debouncer<P> {
    fn read(&mut self) -> Value {
        Value::Bool(self.stable)
    }
}

impl<P: InputPin> Updatable for Debouncer<P> {
    fn update(&mut self) {
        self.changed = false;
        let Some(raw) = self.sample_raw() else {
            return;
        };
        let now = self.clock.now_ms();

        if raw != self.unstable {
            // Still bouncing: restart the settle window.
            self.bounce_at_ms = now;
            self.unstable = raw;
        } else if now.saturating_sub(self.bounce_at_ms) >= self.interval_ms && raw != self.stable {
            self.bounce_at_ms = now;
            self.stable = raw;
            self.changed = true;
        }
    }
}
