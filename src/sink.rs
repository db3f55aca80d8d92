//! Notification sinks.
//!
//! The reference observer does not print; it hands a
//! [`NotificationRecord`] to whatever sink it was built with.
//! [`LogSink`] writes to the `log` facade (UART / USB-CDC in production),
//! [`MemorySink`] keeps records for tests and host simulation.

use core::cell::RefCell;
use std::rc::Rc;

use log::info;

use crate::value::Value;

/// What one observer saw in one notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationRecord {
    pub observer: &'static str,
    pub observable: &'static str,
    pub event: &'static str,
    pub value: Value,
    pub previous: Value,
    pub timestamp_ms: Option<u64>,
}

/// Destination for notification records.
pub trait NotificationSink {
    fn record(&mut self, record: &NotificationRecord);
}

/// Several observers can share one sink.
impl<S: NotificationSink + ?Sized> NotificationSink for Rc<RefCell<S>> {
    fn record(&mut self, record: &NotificationRecord) {
        self.borrow_mut().record(record);
    }
}

/// Writes one log line per record.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

impl NotificationSink for LogSink {
    fn record(&mut self, r: &NotificationRecord) {
        match r.timestamp_ms {
            Some(ts) => info!(
                "NOTIFY | {} <- {} | event={} value={} previous={} at={}ms",
                r.observer, r.observable, r.event, r.value, r.previous, ts
            ),
            None => info!(
                "NOTIFY | {} <- {} | event={} value={} previous={}",
                r.observer, r.observable, r.event, r.value, r.previous
            ),
        }
    }
}

/// Keeps every record in order.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Vec<NotificationRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[NotificationRecord] {
        &self.records
    }

    /// Observer names in the order they were notified.
    pub fn observers(&self) -> Vec<&'static str> {
        self.records.iter().map(|r| r.observer).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl NotificationSink for MemorySink {
    fn record(&mut self, record: &NotificationRecord) {
        self.records.push(*record);
    }
}
