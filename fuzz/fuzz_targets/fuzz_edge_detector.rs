//! Fuzz target: rising-edge and level detection
//!
//! Each input byte is one tick: bit 0 is the source level, the upper bits
//! are the clock step. Asserts the edge event fires exactly on false→true
//! transitions and the level event mirrors the source.
//!
//! cargo fuzz run fuzz_edge_detector

#![no_main]

use std::cell::Cell;
use std::rc::Rc;

use libfuzzer_sys::fuzz_target;
use pollwatch::{Event, ManualClock, Observable, Source, Value};

fuzz_target!(|data: &[u8]| {
    let level = Rc::new(Cell::new(false));
    let clock = Rc::new(ManualClock::new(0));

    let edge_src = level.clone();
    let mut edge = Observable::new(
        "edge",
        Event::rising_edge("went-true", Some(Source::from_fn(move || edge_src.get()))),
        clock.clone(),
    );
    let level_src = level.clone();
    let mut mirror = Observable::new(
        "level",
        Event::level("is-true", Some(Source::from_fn(move || level_src.get()))),
        clock.clone(),
    );

    let mut prev = false;
    for &byte in data {
        let v = byte & 1 == 1;
        level.set(v);
        clock.advance(u64::from(byte >> 1));

        assert_eq!(edge.check(), v && !prev);
        assert_eq!(edge.event().value(), Value::Bool(v));
        assert_eq!(edge.event().previous(), Value::Bool(prev));
        assert_eq!(mirror.check(), v);
        prev = v;
    }
});
