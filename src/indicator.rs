//! Indicator outputs.
//!
//! An indicator is a settable boolean output; on a board, an LED.  The
//! reference observer flips one on every notification, which is a visible
//! substitute for console logging on devices that cannot print fast
//! enough to keep up with a 1 ms timer.
//!
//! ## Dual-target design
//!
//! On hardware: [`PinIndicator`] drives any `StatefulOutputPin`.
//! On host/test: [`MemoryIndicator`] tracks state in-memory only.

use core::cell::RefCell;
use std::rc::Rc;

use embedded_hal::digital::{OutputPin, StatefulOutputPin};
use log::warn;

use crate::error::PinError;

/// A settable boolean output.
pub trait Indicator {
    fn is_on(&mut self) -> bool;

    fn set(&mut self, on: bool);

    fn toggle(&mut self) {
        let on = self.is_on();
        self.set(!on);
    }
}

/// Shared indicator handle, as carried in a notification context.
pub type IndicatorHandle = Rc<RefCell<dyn Indicator>>;

/// Wrap an indicator into a shareable handle.
pub fn shared(indicator: impl Indicator + 'static) -> IndicatorHandle {
    Rc::new(RefCell::new(indicator))
}

// ───────────────────────────────────────────────────────────────
// GPIO indicator
// ───────────────────────────────────────────────────────────────

pub struct PinIndicator<P> {
    pin: P,
    last_error: Option<PinError>,
}

impl<P: StatefulOutputPin> PinIndicator<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            last_error: None,
        }
    }

    pub fn last_error(&self) -> Option<PinError> {
        self.last_error
    }
}

impl<P: StatefulOutputPin> Indicator for PinIndicator<P> {
    fn is_on(&mut self) -> bool {
        match self.pin.is_set_high() {
            Ok(on) => on,
            Err(_) => {
                warn!("PinIndicator: output state unreadable, assuming off");
                self.last_error = Some(PinError::ReadFailed);
                false
            }
        }
    }

    fn set(&mut self, on: bool) {
        let result = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if result.is_err() {
            warn!("PinIndicator: failed to drive output {}", if on { "high" } else { "low" });
            self.last_error = Some(PinError::WriteFailed);
        }
    }

    fn toggle(&mut self) {
        if self.pin.toggle().is_err() {
            warn!("PinIndicator: toggle failed");
            self.last_error = Some(PinError::WriteFailed);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// In-memory indicator
// ───────────────────────────────────────────────────────────────

/// Indicator with no hardware behind it.  Counts toggles.
#[derive(Debug, Default)]
pub struct MemoryIndicator {
    on: bool,
    toggles: u32,
}

impl MemoryIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> bool {
        self.on
    }

    /// Number of `toggle()` calls so far.
    pub fn toggles(&self) -> u32 {
        self.toggles
    }
}

impl Indicator for MemoryIndicator {
    fn is_on(&mut self) -> bool {
        self.on
    }

    fn set(&mut self, on: bool) {
        self.on = on;
    }

    fn toggle(&mut self) {
        self.on = !self.on;
        self.toggles += 1;
    }
}
