//! Observability for the insight pipeline
//!
//! - Structured logging (JSON, one line per event)
//! - Typed lifecycle events
//! - Atomic counters
//!
//! Observability is read-only: it never changes whether an insight is
//! produced.

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{InsightMetrics, MetricsSnapshot};

/// Log a lifecycle event with fields
///
/// Fault events are logged at FATAL, everything else at the given severity.
pub fn log_event(event: Event, severity: Severity, fields: &[(&str, &str)]) {
    let severity = if event.is_fatal() { Severity::Fatal } else { severity };
    Logger::log(severity, event.as_str(), fields);
}
