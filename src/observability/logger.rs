//! Structured JSON logger for gol
//!
//! - One log line = one event
//! - Deterministic key ordering
//! - Explicit severity levels
//! - Synchronous, no buffering
//! - Written to stderr; stdout belongs to query output

use std::fmt::{self, Write as _};
use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};

use serde_json::Value;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Unrecoverable, process exits
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// Parse a level name as used in `GOL_LOG`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "trace" => Some(Severity::Trace),
            "info" => Some(Severity::Info),
            "warn" => Some(Severity::Warn),
            "error" => Some(Severity::Error),
            "fatal" => Some(Severity::Fatal),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Minimum severity written; `LOG_OFF` disables logging
static MIN_SEVERITY: AtomicU8 = AtomicU8::new(Severity::Info as u8);
const LOG_OFF: u8 = u8::MAX;

/// A structured logger that outputs JSON logs
pub struct Logger;

impl Logger {
    /// Only write events at or above `severity`
    pub fn set_min_severity(severity: Severity) {
        MIN_SEVERITY.store(severity as u8, Ordering::Relaxed);
    }

    /// Silence all logging
    pub fn disable() {
        MIN_SEVERITY.store(LOG_OFF, Ordering::Relaxed);
    }

    pub fn enabled(severity: Severity) -> bool {
        severity as u8 >= MIN_SEVERITY.load(Ordering::Relaxed)
    }

    /// Log an event with the given severity and fields
    ///
    /// Fields are output in deterministic order (alphabetical by key)
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        #[cfg(test)]
        {
            if capture::record(severity, || Self::format_line(severity, event, fields)) {
                return;
            }
        }
        if !Self::enabled(severity) {
            return;
        }
        let line = Self::format_line(severity, event, fields);
        let mut stderr = io::stderr().lock();
        let _ = stderr.write_all(line.as_bytes());
        let _ = stderr.flush();
    }

    /// `{"event":..,"severity":..,<fields by key>}` and a newline
    fn format_line(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut sorted = fields.to_vec();
        sorted.sort_by_key(|(key, _)| *key);

        let mut line = format!(
            "{{\"event\":{},\"severity\":\"{}\"",
            Value::from(event),
            severity
        );
        for (key, value) in sorted {
            let _ = write!(line, ",{}:{}", Value::from(key), Value::from(value));
        }
        line.push_str("}\n");
        line
    }

    /// Log at TRACE level
    pub fn trace(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Trace, event, fields);
    }

    /// Log at INFO level
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    /// Log at WARN level
    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    /// Log at ERROR level
    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Error, event, fields);
    }

    /// Log at FATAL level
    pub fn fatal(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Fatal, event, fields);
    }
}


#[cfg(test)]
mod tests {
    use super::capture::capture_logs;
    use super::*;

    fn line(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        Logger::format_line(severity, event, fields)
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }

    #[test]
    fn test_severity_from_name() {
        assert_eq!(Severity::from_name("WARN"), Some(Severity::Warn));
        assert_eq!(Severity::from_name("trace"), Some(Severity::Trace));
        assert_eq!(Severity::from_name("loud"), None);
    }

    #[test]
    fn test_log_json_format() {
        let output = line(Severity::Info, "REQUEST_COMPLETE", &[]);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["event"], "REQUEST_COMPLETE");
        assert_eq!(parsed["severity"], "INFO");
    }

    #[test]
    fn test_log_deterministic_ordering() {
        let output1 = line(
            Severity::Info,
            "TEST",
            &[("status", "200"), ("format", "csv"), ("query", "n")],
        );
        let output2 = line(
            Severity::Info,
            "TEST",
            &[("query", "n"), ("status", "200"), ("format", "csv")],
        );
        assert_eq!(output1, output2);

        let format_pos = output1.find("format").unwrap();
        let query_pos = output1.find("query").unwrap();
        let status_pos = output1.find("status").unwrap();
        assert!(format_pos < query_pos);
        assert!(query_pos < status_pos);
    }

    #[test]
    fn test_log_escapes_special_chars() {
        let output = line(
            Severity::Info,
            "TEST",
            &[("query", "n[name=\"A\\B\"]\nnext")],
        );

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["query"], "n[name=\"A\\B\"]\nnext");
    }

    #[test]
    fn test_log_one_line() {
        let output = line(Severity::Warn, "TEST", &[("a", "1"), ("b", "2")]);
        assert_eq!(output.chars().filter(|c| *c == '\n').count(), 1);
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_log_line_layout() {
        let output = line(Severity::Error, "REQUEST_FAILED", &[("status", "500"), ("b", "x")]);
        assert_eq!(
            output,
            "{\"event\":\"REQUEST_FAILED\",\"severity\":\"ERROR\",\"b\":\"x\",\"status\":\"500\"}\n"
        );
    }

    #[test]
    fn test_log_escapes_control_chars() {
        let output = line(Severity::Info, "TEST", &[("query", "a\u{1}b\tc")]);
        assert!(output.contains("\"a\\u0001b\\tc\""));
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["query"], "a\u{1}b\tc");
    }

    #[test]
    fn test_capture_filters_by_severity() {
        let output = capture_logs(Severity::Warn, || {
            Logger::info("QUIET", &[]);
            Logger::warn("LOUD", &[("n", "1")]);
        });
        assert_eq!(output, "{\"event\":\"LOUD\",\"severity\":\"WARN\",\"n\":\"1\"}\n");
        assert_eq!(capture_logs(Severity::Trace, || {}), "");
    }
}
