//! Pollwatch: a polling event-notification core for microcontroller main
//! loops.
//!
//! Watchers ([`Observable`]s) each own one detection [`Event`] (level,
//! rising edge or periodic timer) and a list of [`Observer`]s.  A
//! single-threaded loop asks every observable to `check()` in turn; when an
//! event fires, its subscribers are notified in registration order.
//! Nothing here needs interrupts or locks.
//!
//! ```text
//! Poller ──▶ Observable::check() ──▶ Event::detect() ──▶ notify() ──▶ Observer::on_notify()
//!                                        │
//!                            Source (pin / debouncer / predicate) or Clock
//! ```
//!
//! Hardware access goes through `embedded-hal` traits, so everything here
//! runs on the host with mock pins and a [`ManualClock`].

#![deny(unused_must_use)]

pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod indicator;
pub mod observable;
pub mod observer;
pub mod poller;
pub mod sink;
pub mod source;
pub mod value;

pub use clock::{Clock, ClockHandle, ManualClock, MonotonicClock};
pub use config::PollConfig;
pub use context::{Context, ContextValue, INDICATOR_KEY};
pub use error::{Error, Result};
pub use event::{Event, EventKind};
pub use indicator::{Indicator, IndicatorHandle, MemoryIndicator, PinIndicator};
pub use observable::Observable;
pub use observer::{FnObserver, Notification, Observer, ObserverHandle, ReportingObserver};
pub use poller::{Poller, StdDelay};
pub use sink::{LogSink, MemorySink, NotificationRecord, NotificationSink};
pub use source::{Debouncer, FnSource, PinSource, Readable, Source, Updatable};
pub use value::Value;
