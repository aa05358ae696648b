//! Test utilities for verifying tracing event emission.
//!
//! Provides an `EventCaptureLayer` that records event levels, messages and
//! fields during tests, allowing assertions on what evaluation logged.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// A recorded event with its level, message, and fields.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: tracing::Level,
    pub target: String,
    pub message: String,
    pub fields: HashMap<String, String>,
}

/// Shared storage for captured events.
#[derive(Debug, Clone, Default)]
pub struct EventStore(Arc<Mutex<Vec<CapturedEvent>>>);

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all captured events.
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.0.lock().unwrap().clone()
    }

    /// Returns true if an event with the given message was captured.
    pub fn has_message(&self, message: &str) -> bool {
        self.0.lock().unwrap().iter().any(|e| e.message == message)
    }

    /// Returns all events with the given message.
    pub fn find_events(&self, message: &str) -> Vec<CapturedEvent> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.message == message)
            .cloned()
            .collect()
    }

    /// Returns all events at the given level.
    pub fn at_level(&self, level: tracing::Level) -> Vec<CapturedEvent> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }
}

/// A tracing `Layer` that captures events into an `EventStore`.
pub struct EventCaptureLayer {
    store: EventStore,
}

impl EventCaptureLayer {
    pub fn new(store: EventStore) -> Self {
        Self { store }
    }
}

/// Visitor that records event fields as string key-value pairs.
struct FieldVisitor {
    message: String,
    fields: HashMap<String, String>,
}

impl FieldVisitor {
    fn insert(&mut self, field: &tracing::field::Field, value: String) {
        if field.name() == "message" {
            self.message = value;
        } else {
            self.fields.insert(field.name().to_string(), value);
        }
    }
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.insert(field, format!("{:?}", value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.insert(field, value.to_string());
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.insert(field, value.to_string());
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.insert(field, value.to_string());
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.insert(field, value.to_string());
    }
}

impl<S> Layer<S> for EventCaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor {
            message: String::new(),
            fields: HashMap::new(),
        };
        event.record(&mut visitor);
        let meta = event.metadata();

        self.store.0.lock().unwrap().push(CapturedEvent {
            level: *meta.level(),
            target: meta.target().to_string(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

/// Initialize a tracing subscriber for tests that captures events into the
/// returned `EventStore`. Call this at the beginning of a test function.
///
/// Returns the store and a guard that must be held for the duration of the
/// test (dropping it unsets the subscriber).
pub fn init_test_tracing() -> (EventStore, tracing::subscriber::DefaultGuard) {
    let store = EventStore::new();
    let layer = EventCaptureLayer::new(store.clone());

    use tracing_subscriber::layer::SubscriberExt;
    let subscriber = tracing_subscriber::registry().with(layer);
    let guard = tracing::subscriber::set_default(subscriber);

    (store, guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_capture_basic() {
        let (store, _guard) = init_test_tracing();

        tracing::debug!(field1 = 42u64, field2 = "hello", "something happened");

        let events = store.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "something happened");
        assert_eq!(events[0].level, tracing::Level::DEBUG);
        assert_eq!(events[0].fields.get("field1").unwrap(), "42");
        assert_eq!(events[0].fields.get("field2").unwrap(), "hello");
    }

    #[test]
    fn test_filter_by_level() {
        let (store, _guard) = init_test_tracing();

        tracing::warn!("first");
        tracing::trace!("second");
        tracing::warn!("third");

        let warnings = store.at_level(tracing::Level::WARN);
        assert_eq!(warnings.len(), 2);
        assert!(store.has_message("second"));
        assert_eq!(store.find_events("third").len(), 1);
    }
}
