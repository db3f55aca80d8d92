//! Integration tests for the polling loop driving several observables,
//! including subscription changes made between and during passes.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pollwatch::{
    Clock, Context, Event, FnObserver, ManualClock, MemoryIndicator, MemorySink, Notification,
    Observable, PollConfig, Poller, ReportingObserver, Source, Value, indicator,
};

fn shared_sink() -> Rc<RefCell<MemorySink>> {
    Rc::new(RefCell::new(MemorySink::new()))
}

#[test]
fn timer_fires_on_fourth_tick_and_restarts_from_there() {
    let clock = Rc::new(ManualClock::new(0));
    let sink = shared_sink();
    let mut poller = Poller::default();
    let mut timer = Observable::new("timer", Event::timer("tick", 100), clock.clone());
    ReportingObserver::attach("observer", sink.clone(), &mut timer);
    poller.add(timer);

    let mut fired_on = Vec::new();
    for tick in 1..=12 {
        clock.advance(30);
        if poller.poll_once() > 0 {
            fired_on.push(tick);
        }
    }

    // 120 ms ≥ 100 ms at tick 4; the next window starts at 120 ms.
    assert_eq!(fired_on, [4, 8, 12]);
    let records = sink.borrow().records().to_vec();
    assert!(records.iter().all(|r| r.value == Value::Millis(120)));
    assert_eq!(records[1].timestamp_ms, Some(240));
}

#[test]
fn one_millisecond_timer_fires_every_pass() {
    let clock = Rc::new(ManualClock::new(0));
    let mut poller = Poller::default();
    poller.add(Observable::new("fast", Event::timer("tick", 1), clock.clone()));

    for _ in 0..50 {
        clock.advance(1);
        assert_eq!(poller.poll_once(), 1);
    }
}

#[test]
fn loop_can_retire_an_observer_after_first_fire() {
    // Two observers on a predicate observable and one on a timer; after the
    // predicate first fires, the loop deregisters observer1.
    let clock = Rc::new(ManualClock::new(0));
    let sink = shared_sink();
    let led = Rc::new(RefCell::new(MemoryIndicator::new()));

    let trigger = Rc::new(Cell::new(false));
    let src = trigger.clone();
    let context = Context::with_indicator(led.clone())
        .with("reason", "Dunno")
        .unwrap();
    let mut predicate = Observable::with_context(
        "testObservable",
        Event::level("random", Some(Source::from_fn(move || src.get()))),
        context,
        clock.clone(),
    );
    let observer1 = ReportingObserver::attach("observer1", sink.clone(), &mut predicate);
    ReportingObserver::attach("observer2", sink.clone(), &mut predicate);

    let mut timer = Observable::with_context(
        "testTimer",
        Event::timer("tick", 1),
        Context::with_indicator(led.clone()),
        clock.clone(),
    );
    ReportingObserver::attach("observer3", sink.clone(), &mut timer);

    let mut poller = Poller::new(PollConfig::default());
    let predicate_idx = poller.add(predicate);
    poller.add(timer);

    for pass in 0..6 {
        trigger.set(pass == 2 || pass == 4);
        clock.advance(1);
        poller.poll_once();
        let obs = poller.get_mut(predicate_idx).unwrap();
        if obs.event().timestamp_ms() == Some(clock.now_ms()) {
            obs.deregister(&observer1);
        }
    }

    let names = sink.borrow().observers();
    let o1 = names.iter().filter(|n| **n == "observer1").count();
    let o2 = names.iter().filter(|n| **n == "observer2").count();
    let o3 = names.iter().filter(|n| **n == "observer3").count();
    assert_eq!(o1, 1, "observer1 retired after the first fire");
    assert_eq!(o2, 2);
    assert_eq!(o3, 6);
    // Every notification toggled the shared LED.
    assert_eq!(led.borrow().toggles(), 9);
}

#[test]
fn one_shot_observer_self_deregisters() {
    let clock = Rc::new(ManualClock::new(0));
    let sink = shared_sink();
    let mut obs = Observable::new("oneshot", Event::timer("tick", 10), clock.clone());

    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let once = FnObserver::attach(
        "once",
        move |n: &mut Notification<'_>| {
            counter.set(counter.get() + 1);
            n.deregister_self();
        },
        &mut obs,
    );
    ReportingObserver::attach("steady", sink.clone(), &mut obs);

    clock.advance(10);
    assert!(obs.check());
    assert!(!obs.is_registered(&once));

    clock.advance(10);
    assert!(obs.check());
    assert_eq!(calls.get(), 1);
    assert_eq!(sink.borrow().len(), 2);
    assert_eq!(obs.subscriber_names(), ["steady"]);
}

#[test]
fn sourceless_observable_is_inert() {
    let clock = Rc::new(ManualClock::new(0));
    let sink = shared_sink();
    let mut obs = Observable::new("nothing", Event::rising_edge("edge", None), clock.clone());
    ReportingObserver::attach("o", sink.clone(), &mut obs);

    let mut poller = Poller::default();
    poller.add(obs);
    for _ in 0..10 {
        clock.advance(5);
        assert_eq!(poller.poll_once(), 0);
    }
    assert!(sink.borrow().is_empty());
}

#[test]
fn observer_without_indicator_in_context_still_records() {
    let clock = Rc::new(ManualClock::new(0));
    let sink = shared_sink();
    let ctx = Context::new().with("led", 7_i64).unwrap();
    let mut obs = Observable::with_context(
        "odd",
        Event::level("on", Some(Source::from_fn(|| true))),
        ctx,
        clock,
    );
    ReportingObserver::attach("o", sink.clone(), &mut obs);
    assert!(obs.check());
    assert_eq!(sink.borrow().len(), 1);
}

#[test]
fn custom_indicator_key() {
    let clock = Rc::new(ManualClock::new(0));
    let status = Rc::new(RefCell::new(MemoryIndicator::new()));
    let ctx = Context::new()
        .with("status", indicator::shared(MemoryIndicator::new()))
        .unwrap();
    let ctx = ctx.with("status", status.clone() as pollwatch::IndicatorHandle).unwrap();
    let mut obs = Observable::with_context(
        "keyed",
        Event::level("on", Some(Source::from_fn(|| true))),
        ctx,
        clock,
    );
    obs.subscribe(ReportingObserver::new("o", MemorySink::new()).indicator_key("status"));
    obs.check();
    assert_eq!(status.borrow().toggles(), 1);
}
