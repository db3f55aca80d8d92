//! Detection events.
//!
//! An [`Event`] knows *what* is watched and *how* to decide that it has
//! happened.  It is owned by exactly one
//! [`Observable`](crate::observable::Observable) and only ever advanced
//! through that observable's `check()`.
//!
//! | Kind         | Observation                       | Fires when                             |
//! |--------------|-----------------------------------|----------------------------------------|
//! | Level        | source value                      | value is truthy (every such tick)      |
//! | Rising edge  | source value                      | value truthy and previous value falsy  |
//! | Timer        | ms since last fire (or arming)    | elapsed ≥ period, then restarts at now |
//!
//! `detect()` is the only place the `previous := current` shift happens,
//! so there is exactly one shift per tick regardless of who calls it.

use log::debug;

use crate::source::Source;
use crate::value::Value;

/// Timer period used when none is configured.
pub const DEFAULT_TIMER_PERIOD_MS: u64 = 1000;

/// Shortest timer period honoured; smaller requests are raised to this.
pub const MIN_TIMER_PERIOD_MS: u64 = 1;

/// Discriminant exposed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Level,
    RisingEdge,
    Timer,
}

#[derive(Debug)]
enum Detector {
    Level { source: Option<Source> },
    RisingEdge { source: Option<Source> },
    Timer { period_ms: u64, started_ms: Option<u64> },
}

/// A detection strategy plus its observation state.
#[derive(Debug)]
pub struct Event {
    name: &'static str,
    detector: Detector,
    current: Value,
    previous: Value,
    timestamp_ms: Option<u64>,
}

impl Event {
    fn with_detector(name: &'static str, detector: Detector) -> Self {
        Self {
            name,
            detector,
            current: Value::default(),
            previous: Value::default(),
            timestamp_ms: None,
        }
    }

    /// Level-triggered: fires on every tick the source reads truthy.
    /// Without a source it never fires.
    pub fn level(name: &'static str, source: Option<Source>) -> Self {
        Self::with_detector(name, Detector::Level { source })
    }

    /// Fires once per false→true transition.  The observation before the
    /// first tick counts as `false`, so a source that is already true
    /// fires on the first tick.
    pub fn rising_edge(name: &'static str, source: Option<Source>) -> Self {
        Self::with_detector(name, Detector::RisingEdge { source })
    }

    /// Like [`rising_edge`](Self::rising_edge), but the source is read once
    /// now to seed the previous observation.  A source that is already true
    /// at construction has to go false before it can fire.
    pub fn rising_edge_primed(name: &'static str, mut source: Source) -> Self {
        let seed = source.sample();
        let mut event = Self::rising_edge(name, Some(source));
        event.current = seed;
        debug!("Event '{}': primed with {}", name, seed);
        event
    }

    /// Periodic timer.  Starts counting when its observable is built.
    pub fn timer(name: &'static str, period_ms: u64) -> Self {
        let period_ms = period_ms.max(MIN_TIMER_PERIOD_MS);
        Self::with_detector(
            name,
            Detector::Timer {
                period_ms,
                started_ms: None,
            },
        )
    }

    /// Timer with [`DEFAULT_TIMER_PERIOD_MS`].
    pub fn default_timer(name: &'static str) -> Self {
        Self::timer(name, DEFAULT_TIMER_PERIOD_MS)
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Observation made by the most recent `detect()`.
    pub fn value(&self) -> Value {
        self.current
    }

    /// Observation made by the `detect()` before that.
    pub fn previous(&self) -> Value {
        self.previous
    }

    /// Time of the most recent positive detection; `None` before the first.
    pub fn timestamp_ms(&self) -> Option<u64> {
        self.timestamp_ms
    }

    pub fn kind(&self) -> EventKind {
        match self.detector {
            Detector::Level { .. } => EventKind::Level,
            Detector::RisingEdge { .. } => EventKind::RisingEdge,
            Detector::Timer { .. } => EventKind::Timer,
        }
    }

    /// Timer period, or `None` for source-driven events.
    pub fn period_ms(&self) -> Option<u64> {
        match self.detector {
            Detector::Timer { period_ms, .. } => Some(period_ms),
            _ => None,
        }
    }

    pub fn has_source(&self) -> bool {
        match &self.detector {
            Detector::Level { source } | Detector::RisingEdge { source } => source.is_some(),
            Detector::Timer { .. } => false,
        }
    }

    // ── Driven by the owning observable ───────────────────────

    /// Start the timer reference if it has not been started yet.
    pub(crate) fn arm(&mut self, now_ms: u64) {
        if let Detector::Timer { started_ms, .. } = &mut self.detector {
            started_ms.get_or_insert(now_ms);
        }
    }

    /// Record a positive detection.
    pub(crate) fn stamp(&mut self, now_ms: u64) {
        self.timestamp_ms = Some(now_ms);
    }

    /// Take this tick's observation and decide whether the event happened.
    pub fn detect(&mut self, now_ms: u64) -> bool {
        self.previous = self.current;

        match &mut self.detector {
            Detector::Level { source } => {
                let Some(source) = source else {
                    return false;
                };
                self.current = source.sample();
                self.current.is_truthy()
            }

            Detector::RisingEdge { source } => {
                let Some(source) = source else {
                    return false;
                };
                self.current = source.sample();
                self.current.is_truthy() && !self.previous.is_truthy()
            }

            Detector::Timer {
                period_ms,
                started_ms,
            } => {
                let start = *started_ms.get_or_insert(now_ms);
                let elapsed = now_ms.saturating_sub(start);
                self.current = Value::Millis(elapsed);
                if elapsed >= *period_ms {
                    // Restart from now; overshoot is not carried over.
                    *started_ms = Some(now_ms);
                    true
                } else {
                    false
                }
            }
        }
    }
}
