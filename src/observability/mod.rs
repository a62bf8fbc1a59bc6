//! Observability subsystem for tabledb
//!
//! - Structured logging (JSON lines on stderr)
//! - Per-table counters
//! - Typed events
//!
//! Observability is read-only: nothing here changes the outcome of an
//! insert, a seek or a search.

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsSnapshot, TableMetrics};

/// Log an event at its natural severity
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log an event with fields at its natural severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    match event {
        e if e.is_rejection() => Logger::warn(e.as_str(), fields),
        Event::SortFieldSkipped => Logger::warn(event.as_str(), fields),
        Event::QueryComplete => Logger::trace(event.as_str(), fields),
        _ => Logger::info(event.as_str(), fields),
    }
}
