//! Port for structured debate logging.
//!
//! Defines the [`DebateLogger`] trait for recording debate events (round
//! boundaries, contributions, convergence rulings, synthesis) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the debate
//! itself in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured debate event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. Implementations add the timestamp.
pub struct DebateEvent {
    /// Event type identifier (e.g., "round_start", "contribution", "synthesis").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl DebateEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging debate events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL line).
/// The `log` method is intentionally synchronous and non-fallible: logging
/// failures must never disrupt a running debate.
pub trait DebateLogger: Send + Sync {
    /// Record a debate event.
    fn log(&self, event: DebateEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoopDebateLogger;

impl DebateLogger for NoopDebateLogger {
    fn log(&self, _event: DebateEvent) {}
}
