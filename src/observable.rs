//! Observables: one event, many subscribers.
//!
//! ```text
//!   check() ──▶ Event::detect(now) ──true──▶ stamp(now) ──▶ notify()
//!                                                             │
//!                     ┌───────────────────────────────────────┘
//!                     ▼
//!   for each subscriber (registration order):
//!       on_notify(name, event, context)  ──▶ queued (de)registrations
//!   apply queued changes
//! ```
//!
//! Everything is synchronous and single-threaded: `check()` never blocks,
//! and nothing else touches the event while it runs.

use core::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};

use crate::clock::ClockHandle;
use crate::context::Context;
use crate::event::Event;
use crate::observer::{Change, Notification, Observer, ObserverHandle, ObserverKey};

/// Owns one [`Event`] and the ordered list of observers interested in it.
pub struct Observable {
    name: &'static str,
    event: Event,
    subscribers: Vec<ObserverHandle>,
    context: Context,
    clock: ClockHandle,
}

impl Observable {
    pub fn new(name: &'static str, event: Event, clock: ClockHandle) -> Self {
        Self::with_context(name, event, Context::new(), clock)
    }

    /// `context` is forwarded verbatim to every notification.
    pub fn with_context(
        name: &'static str,
        mut event: Event,
        context: Context,
        clock: ClockHandle,
    ) -> Self {
        event.arm(clock.now_ms());
        debug!(
            "Observable '{}': watching '{}' ({:?}), {} context entries",
            name,
            event.name(),
            event.kind(),
            context.len()
        );
        Self {
            name,
            event,
            subscribers: Vec::new(),
            context,
            clock,
        }
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_registered<O: Observer + ?Sized>(&self, observer: &Rc<RefCell<O>>) -> bool {
        let key = ObserverKey::of(observer);
        self.subscribers.iter().any(|s| ObserverKey::of(s) == key)
    }

    /// Subscriber names in notification order.
    pub fn subscriber_names(&self) -> Vec<String> {
        self.subscribers
            .iter()
            .map(|s| match s.try_borrow() {
                Ok(o) => o.name().to_owned(),
                Err(_) => String::from("<busy>"),
            })
            .collect()
    }

    // ── Subscriptions ─────────────────────────────────────────

    /// Append `observer`.  Registering the same observer twice is the
    /// caller's mistake; it will then be notified twice.
    pub fn register(&mut self, observer: ObserverHandle) {
        self.subscribers.push(observer);
    }

    /// Remove the first registration of `observer`.  Not registered: no-op.
    pub fn deregister<O: Observer + ?Sized>(&mut self, observer: &Rc<RefCell<O>>) {
        self.remove_key(ObserverKey::of(observer));
    }

    /// Wrap `observer` in a handle, register it, and hand back the typed handle.
    pub fn subscribe<O: Observer + 'static>(&mut self, observer: O) -> Rc<RefCell<O>> {
        let handle = Rc::new(RefCell::new(observer));
        self.register(handle.clone());
        handle
    }

    fn remove_key(&mut self, key: ObserverKey) {
        if let Some(pos) = self.subscribers.iter().position(|s| ObserverKey::of(s) == key) {
            self.subscribers.remove(pos);
        }
    }

    // ── Polling ───────────────────────────────────────────────

    /// Poll the event once.  On a positive detection the event is
    /// timestamped and every subscriber is notified.
    pub fn check(&mut self) -> bool {
        let now = self.clock.now_ms();
        if !self.event.detect(now) {
            return false;
        }
        self.event.stamp(now);
        debug!(
            "Observable '{}': '{}' fired at {}ms (value={})",
            self.name,
            self.event.name(),
            now,
            self.event.value()
        );
        self.notify();
        true
    }

    /// Notify every subscriber in registration order.  Returns how many
    /// observers were actually invoked.
    ///
    /// Subscription changes requested through the [`Notification`] are
    /// applied after the last observer returns, in the order requested.
    pub fn notify(&mut self) -> usize {
        let mut changes = Vec::new();
        let mut notified = 0;

        for subscriber in &self.subscribers {
            let key = ObserverKey::of(subscriber);
            let Ok(mut observer) = subscriber.try_borrow_mut() else {
                warn!("Observable '{}': subscriber busy, skipped", self.name);
                continue;
            };
            let mut notification =
                Notification::new(self.name, &self.event, &self.context, key, &mut changes);
            observer.on_notify(&mut notification);
            notified += 1;
        }

        for change in changes {
            match change {
                Change::Register(observer) => self.register(observer),
                Change::Deregister(key) => self.remove_key(key),
            }
        }

        notified
    }
}

impl core::fmt::Debug for Observable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Observable")
            .field("name", &self.name)
            .field("event", &self.event)
            .field("subscribers", &self.subscribers.len())
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
