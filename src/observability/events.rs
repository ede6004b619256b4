//! Observability events for gol
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events in gol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Library
    /// Library file opened
    StoreOpened,
    /// Library failed to open
    StoreFailed,

    // Server lifecycle
    /// Server configuration resolved
    ConfigLoaded,
    /// Listener bound, accepting requests
    Serving,
    /// Listener stopped
    ServerStopped,

    // Gateway requests
    /// Query string could not be decoded
    RequestRejected,
    /// Gateway task did not finish
    RequestFailed,

    // CLI
    /// Command handler failed
    CommandFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::StoreOpened => "STORE_OPENED",
            Event::StoreFailed => "STORE_FAILED",

            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::Serving => "GOL_SERVING",
            Event::ServerStopped => "GOL_STOPPED",

            Event::RequestRejected => "REQUEST_REJECTED",
            Event::RequestFailed => "REQUEST_FAILED",

            Event::CommandFailed => "COMMAND_FAILED",
        }
    }

    /// Returns true if this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::StoreFailed | Event::RequestFailed | Event::CommandFailed
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
