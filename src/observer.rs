//! Observers and the notification they receive.
//!
//! An observer reacts to an observable's event.  It gets a
//! [`Notification`] with the observable's name, the event (value,
//! previous value, timestamp) and the observable's context.
//!
//! Observers may change subscriptions from inside `on_notify`; the classic
//! case is a one-shot listener deregistering itself.  Those requests go
//! through the notification and are applied once the current pass over the
//! subscriber list is finished: every observer subscribed when the pass
//! started is notified exactly once, and the changes are visible from the
//! next pass on.

use core::cell::RefCell;
use std::rc::Rc;

use log::warn;

use crate::context::{Context, INDICATOR_KEY};
use crate::event::Event;
use crate::observable::Observable;
use crate::sink::{NotificationRecord, NotificationSink};

/// A subscriber.
pub trait Observer {
    fn name(&self) -> &str;

    fn on_notify(&mut self, notification: &mut Notification<'_>);
}

/// Shared, type-erased observer handle as stored by an observable.
pub type ObserverHandle = Rc<RefCell<dyn Observer>>;

// ───────────────────────────────────────────────────────────────
// Subscription identity and deferred changes
// ───────────────────────────────────────────────────────────────

/// Identity of an observer allocation.  Only compared, never dereferenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ObserverKey(*const ());

impl ObserverKey {
    pub(crate) fn of<O: ?Sized>(handle: &Rc<RefCell<O>>) -> Self {
        Self(Rc::as_ptr(handle).cast::<()>())
    }
}

/// A subscription change requested during a notification pass.
pub(crate) enum Change {
    Register(ObserverHandle),
    Deregister(ObserverKey),
}

// ───────────────────────────────────────────────────────────────
// Notification
// ───────────────────────────────────────────────────────────────

/// What an observer receives when its observable fires.
pub struct Notification<'a> {
    observable: &'static str,
    event: &'a Event,
    context: &'a Context,
    subscriber: ObserverKey,
    changes: &'a mut Vec<Change>,
}

impl<'a> Notification<'a> {
    pub(crate) fn new(
        observable: &'static str,
        event: &'a Event,
        context: &'a Context,
        subscriber: ObserverKey,
        changes: &'a mut Vec<Change>,
    ) -> Self {
        Self {
            observable,
            event,
            context,
            subscriber,
            changes,
        }
    }

    /// Name of the observable that fired.
    pub fn observable(&self) -> &'static str {
        self.observable
    }

    pub fn event(&self) -> &'a Event {
        self.event
    }

    pub fn context(&self) -> &'a Context {
        self.context
    }

    /// Unsubscribe the observer being notified, after this pass.
    pub fn deregister_self(&mut self) {
        self.changes.push(Change::Deregister(self.subscriber));
    }

    /// Unsubscribe another observer, after this pass.
    pub fn deregister<O: Observer + ?Sized>(&mut self, observer: &Rc<RefCell<O>>) {
        self.changes.push(Change::Deregister(ObserverKey::of(observer)));
    }

    /// Subscribe an observer, after this pass.
    pub fn register(&mut self, observer: ObserverHandle) {
        self.changes.push(Change::Register(observer));
    }
}

// ───────────────────────────────────────────────────────────────
// Reference observer
// ───────────────────────────────────────────────────────────────

/// Records every notification into a sink and toggles the context's
/// indicator, when there is one.
pub struct ReportingObserver<S> {
    name: &'static str,
    sink: S,
    indicator_key: &'static str,
}

impl<S: NotificationSink + 'static> ReportingObserver<S> {
    pub fn new(name: &'static str, sink: S) -> Self {
        Self {
            name,
            sink,
            indicator_key: INDICATOR_KEY,
        }
    }

    /// Build and subscribe to `observable` in one step.
    pub fn attach(name: &'static str, sink: S, observable: &mut Observable) -> Rc<RefCell<Self>> {
        observable.subscribe(Self::new(name, sink))
    }

    /// Look for the indicator under a different context key.
    #[must_use]
    pub fn indicator_key(mut self, key: &'static str) -> Self {
        self.indicator_key = key;
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: NotificationSink> Observer for ReportingObserver<S> {
    fn name(&self) -> &str {
        self.name
    }

    fn on_notify(&mut self, n: &mut Notification<'_>) {
        let event = n.event();
        self.sink.record(&NotificationRecord {
            observer: self.name,
            observable: n.observable(),
            event: event.name(),
            value: event.value(),
            previous: event.previous(),
            timestamp_ms: event.timestamp_ms(),
        });

        if let Some(indicator) = n.context().indicator(self.indicator_key) {
            match indicator.try_borrow_mut() {
                Ok(mut indicator) => indicator.toggle(),
                Err(_) => warn!("{}: indicator busy, toggle skipped", self.name),
            }
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Closure observer
// ───────────────────────────────────────────────────────────────

/// Function-based observer for simple cases.
pub struct FnObserver<F> {
    name: &'static str,
    f: F,
}

impl<F: FnMut(&mut Notification<'_>) + 'static> FnObserver<F> {
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }

    pub fn attach(name: &'static str, f: F, observable: &mut Observable) -> Rc<RefCell<Self>> {
        observable.subscribe(Self::new(name, f))
    }
}

impl<F: FnMut(&mut Notification<'_>)> Observer for FnObserver<F> {
    fn name(&self) -> &str {
        self.name
    }

    fn on_notify(&mut self, notification: &mut Notification<'_>) {
        (self.f)(notification);
    }
}
