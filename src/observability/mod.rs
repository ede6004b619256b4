//! Observability subsystem for gol
//!
//! This module provides:
//! - Structured logging (JSON lines on stderr)
//! - Typed lifecycle and request events
//! - Begin/complete scopes with elapsed time
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on query output
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use gol::observability::{log_event_with_fields, Event, ObservationScope};
//!
//! log_event_with_fields(Event::Serving, &[("addr", "0.0.0.0:8000")]);
//!
//! let scope = ObservationScope::new("REQUEST");
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::{ObservationScope, Timer};

#[cfg(test)]
pub use logger::capture::capture_logs;

/// Environment variable selecting the log level (`off`, `trace`, `info`, ...)
pub const LOG_ENV: &str = "GOL_LOG";

/// Apply the log level from `GOL_LOG`, if set
pub fn init_from_env() {
    if let Ok(value) = std::env::var(LOG_ENV) {
        apply_level(&value);
    }
}

/// Apply a level name; `off` disables logging, unknown names are ignored
pub fn apply_level(name: &str) {
    if name.eq_ignore_ascii_case("off") {
        Logger::disable();
    } else if let Some(severity) = Severity::from_name(name) {
        Logger::set_min_severity(severity);
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_failure() {
        Severity::Error
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}
