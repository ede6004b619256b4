//! ObservationScope for automatic begin/complete logging
//!
//! - Logs `{name}_BEGIN` on creation (TRACE)
//! - Logs `{name}_COMPLETE` with elapsed time on `complete`
//! - Logs `{name}_FAILED` on `fail`
//! - Logs `{name}_INCOMPLETE` on drop if neither was called

use std::cell::Cell;
use std::time::Instant;

use super::logger::{Logger, Severity};

/// A scope that automatically logs begin and complete events
///
/// ```ignore
/// let scope = ObservationScope::with_fields("REQUEST", &[("format", "csv")]);
/// // ... do work ...
/// scope.complete_with_fields(&[("status", "200")]);
/// ```
pub struct ObservationScope<'a> {
    name: &'a str,
    completed: Cell<bool>,
    fields: Vec<(&'a str, String)>,
    timer: Timer,
}

impl<'a> ObservationScope<'a> {
    /// Create a new observation scope
    pub fn new(name: &'a str) -> Self {
        Self::with_fields(name, &[])
    }

    /// Create a new observation scope with fields repeated on every event
    pub fn with_fields(name: &'a str, fields: &[(&'a str, &str)]) -> Self {
        Logger::trace(&format!("{}_BEGIN", name), fields);

        Self {
            name,
            completed: Cell::new(false),
            fields: fields.iter().map(|(k, v)| (*k, v.to_string())).collect(),
            timer: Timer::new(),
        }
    }

    /// Mark the scope as successfully completed
    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    /// Mark the scope as successfully completed with additional fields
    pub fn complete_with_fields(self, extra_fields: &[(&str, &str)]) {
        self.finish(Severity::Info, "COMPLETE", extra_fields);
    }

    /// Mark the scope as failed
    pub fn fail(self, severity: Severity, reason: &str) {
        self.finish(severity, "FAILED", &[("reason", reason)]);
    }

    /// Mark the scope as failed with additional fields
    pub fn fail_with_fields(self, severity: Severity, extra_fields: &[(&str, &str)]) {
        self.finish(severity, "FAILED", extra_fields);
    }

    /// Check if the scope has been completed
    pub fn is_completed(&self) -> bool {
        self.completed.get()
    }

    fn finish(&self, severity: Severity, suffix: &str, extra_fields: &[(&str, &str)]) {
        self.completed.set(true);
        let elapsed = self.timer.elapsed_ms();
        let mut all_fields: Vec<(&str, &str)> =
            self.fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        all_fields.extend(extra_fields.iter().copied());
        all_fields.push(("elapsed_ms", elapsed.as_str()));
        Logger::log(severity, &format!("{}_{}", self.name, suffix), &all_fields);
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if !self.completed.get() {
            let event = format!("{}_INCOMPLETE", self.name);
            Logger::warn(&event, &[("reason", "scope dropped without completion")]);
        }
    }
}

/// A simple duration timer for logging elapsed time
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed milliseconds as a string
    pub fn elapsed_ms(&self) -> String {
        self.start.elapsed().as_millis().to_string()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::capture_logs;

    fn events(output: &str) -> Vec<serde_json::Value> {
        output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_scope_begin_and_complete() {
        let output = capture_logs(Severity::Trace, || {
            let scope = ObservationScope::with_fields("TEST", &[("format", "csv")]);
            assert!(!scope.is_completed());
            scope.complete_with_fields(&[("status", "200")]);
        });
        let lines = events(&output);
        assert_eq!(lines.len(), 2);

        assert_eq!(lines[0]["event"], "TEST_BEGIN");
        assert_eq!(lines[0]["severity"], "TRACE");
        assert_eq!(lines[0]["format"], "csv");
        assert!(lines[0].get("elapsed_ms").is_none());

        assert_eq!(lines[1]["event"], "TEST_COMPLETE");
        assert_eq!(lines[1]["severity"], "INFO");
        assert_eq!(lines[1]["format"], "csv");
        assert_eq!(lines[1]["status"], "200");
        assert!(lines[1]["elapsed_ms"].as_str().unwrap().parse::<u64>().is_ok());
    }

    #[test]
    fn test_scope_fail() {
        let output = capture_logs(Severity::Info, || {
            ObservationScope::new("TEST").fail(Severity::Warn, "bad query");
        });
        let lines = events(&output);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["event"], "TEST_FAILED");
        assert_eq!(lines[0]["severity"], "WARN");
        assert_eq!(lines[0]["reason"], "bad query");
        assert!(lines[0].get("elapsed_ms").is_some());
    }

    #[test]
    fn test_scope_drop_without_complete() {
        let output = capture_logs(Severity::Info, || {
            let scope = ObservationScope::new("TEST");
            drop(scope);
        });
        let lines = events(&output);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["event"], "TEST_INCOMPLETE");
        assert_eq!(lines[0]["severity"], "WARN");
    }

    #[test]
    fn test_completed_scope_logs_nothing_on_drop() {
        let output = capture_logs(Severity::Trace, || ObservationScope::new("TEST").complete());
        assert!(!output.contains("INCOMPLETE"));
        assert_eq!(output.lines().count(), 2);
    }

    #[test]
    fn test_timer() {
        let timer = Timer::new();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let ms: u64 = timer.elapsed_ms().parse().unwrap();
        assert!(ms >= 10);
    }
}
