//! Monotonic millisecond clocks.
//!
//! - **`target_os = "espidf"`**: [`MonotonicClock`] wraps
//!   `esp_timer_get_time()` from the ESP-IDF high-resolution timer.
//! - **`not(target_os = "espidf")`**: [`MonotonicClock`] uses
//!   `std::time::Instant` for host-side runs.
//!
//! [`ManualClock`] is driven by hand and is what the tests and host
//! simulations use to make timer behaviour deterministic.

use core::cell::Cell;
use std::rc::Rc;

/// Monotonic time source.  `now_ms` must never decrease.
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed origin.
    fn now_ms(&self) -> u64;
}

/// Shared clock handle.  Everything runs on one thread, so `Rc` is enough.
pub type ClockHandle = Rc<dyn Clock>;

// ───────────────────────────────────────────────────────────────
// Hardware / host clock
// ───────────────────────────────────────────────────────────────

/// Milliseconds since boot (ESP-IDF) or since construction (host).
pub struct MonotonicClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Convenience: a fresh clock already wrapped in a [`ClockHandle`].
    pub fn handle() -> ClockHandle {
        Rc::new(Self::new())
    }
}

impl Clock for MonotonicClock {
    #[cfg(target_os = "espidf")]
    fn now_ms(&self) -> u64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1000
    }

    #[cfg(not(target_os = "espidf"))]
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

// ───────────────────────────────────────────────────────────────
// Simulated clock
// ───────────────────────────────────────────────────────────────

/// Hand-driven clock for tests and simulation.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    /// Move time forward by `ms`.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    /// Jump to `ms`.  Earlier instants are ignored to keep the clock monotonic.
    pub fn set(&self, ms: u64) {
        if ms > self.now.get() {
            self.now.set(ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}
