//! Integration tests for the GPIO → Debouncer → edge event → observer → LED
//! pipeline.
//!
//! The button is active-low with a pull-up, like a board boot button: the
//! mock input reads high while released.

use std::cell::RefCell;
use std::rc::Rc;

use pollwatch::error::PinError;
use pollwatch::{
    Context, Debouncer, Event, ManualClock, MemorySink, Observable, PinIndicator, PinSource,
    Readable, ReportingObserver, Source, Value, indicator,
};

use crate::mock_hw::{MockInput, MockLed};

struct Rig {
    clock: Rc<ManualClock>,
    button: MockInput,
    led: MockLed,
    sink: Rc<RefCell<MemorySink>>,
    observable: Observable,
}

impl Rig {
    fn new() -> Self {
        let clock = Rc::new(ManualClock::new(0));
        let button = MockInput::new(true);
        let led = MockLed::new();
        let sink = Rc::new(RefCell::new(MemorySink::new()));

        let debounced = Debouncer::with_interval(button.clone(), clock.clone(), 10).active_low();
        let mut observable = Observable::with_context(
            "button",
            Event::rising_edge("pressed", Some(Source::updating(debounced))),
            Context::with_indicator(indicator::shared(PinIndicator::new(led.clone()))),
            clock.clone(),
        );
        ReportingObserver::attach("logger", sink.clone(), &mut observable);

        Self {
            clock,
            button,
            led,
            sink,
            observable,
        }
    }

    /// Advance the clock, then poll once.
    fn tick(&mut self, ms: u64) -> bool {
        self.clock.advance(ms);
        self.observable.check()
    }
}

#[test]
fn bouncy_press_fires_once_and_toggles_led() {
    let mut rig = Rig::new();
    assert!(!rig.tick(1));

    // Press with contact bounce.
    rig.button.set_low();
    assert!(!rig.tick(1));
    rig.button.set_high();
    assert!(!rig.tick(1));
    rig.button.set_low();
    assert!(!rig.tick(1));

    // Settled for 10 ms → one rising edge.
    assert!(rig.tick(10));

    // Held: no re-fire.
    for _ in 0..5 {
        assert!(!rig.tick(10));
    }

    assert_eq!(rig.sink.borrow().len(), 1);
    assert!(rig.led.is_lit());

    let record = rig.sink.borrow().records()[0];
    assert_eq!(record.observable, "button");
    assert_eq!(record.event, "pressed");
    assert_eq!(record.value, Value::Bool(true));
    assert_eq!(record.previous, Value::Bool(false));
    assert_eq!(record.timestamp_ms, Some(14));
}

#[test]
fn release_then_press_fires_again() {
    let mut rig = Rig::new();

    rig.button.set_low();
    rig.tick(1);
    assert!(rig.tick(10));

    rig.button.set_high();
    rig.tick(1);
    assert!(!rig.tick(10), "release is not a rising edge");

    rig.button.set_low();
    rig.tick(1);
    assert!(rig.tick(10));

    assert_eq!(rig.sink.borrow().len(), 2);
    assert_eq!(rig.led.history(), [true, false]);
}

#[test]
fn glitch_shorter_than_debounce_is_ignored() {
    let mut rig = Rig::new();
    rig.button.set_low();
    rig.tick(1);
    rig.tick(4);
    rig.button.set_high();
    for _ in 0..5 {
        assert!(!rig.tick(10));
    }
    assert!(rig.sink.borrow().is_empty());
    assert!(rig.led.history().is_empty());
}

#[test]
fn failing_pin_read_never_fires() {
    let clock = Rc::new(ManualClock::new(0));
    let button = MockInput::new(false);
    let sink = Rc::new(RefCell::new(MemorySink::new()));
    let mut observable = Observable::new(
        "raw",
        Event::rising_edge("high", Some(Source::plain(PinSource::new(button.clone())))),
        clock,
    );
    ReportingObserver::attach("logger", sink.clone(), &mut observable);

    button.set_failing(true);
    button.set_high();
    assert!(!observable.check(), "failed read holds the last good level");

    button.set_failing(false);
    assert!(observable.check());
    assert_eq!(sink.borrow().len(), 1);
}

#[test]
fn pin_source_reports_error() {
    let button = MockInput::new(true);
    button.set_failing(true);
    let mut source = PinSource::new(button);
    assert_eq!(source.read(), Value::Bool(false));
    assert_eq!(source.last_error(), Some(PinError::ReadFailed));
}
