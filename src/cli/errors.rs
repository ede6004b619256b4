//! CLI-specific error types
//!
//! Every CLI error ends the invocation with exit code 1 and one failure
//! line on stderr.

use std::fmt;
use std::io;

use crate::error::{ErrorKind, GolError};

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// No registered command has this name
    UnknownCommand,
    /// Malformed command line
    Usage,
    /// Configuration file or option error
    ConfigError,
    /// Bad library, query, format or geometry
    QueryError,
    /// I/O error (stdout, sockets)
    IoError,
    /// Library failed its integrity check
    CheckFailed,
    /// A command panicked
    Panicked,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "GOL_CLI_UNKNOWN_COMMAND",
            Self::Usage => "GOL_CLI_USAGE",
            Self::ConfigError => "GOL_CLI_CONFIG_ERROR",
            Self::QueryError => "GOL_CLI_QUERY_ERROR",
            Self::IoError => "GOL_CLI_IO_ERROR",
            Self::CheckFailed => "GOL_CLI_CHECK_FAILED",
            Self::Panicked => "GOL_CLI_PANICKED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Unknown command
    pub fn unknown_command(name: &str) -> Self {
        Self::new(CliErrorCode::UnknownCommand, format!("Unknown command: {}", name))
    }

    /// Usage error
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::Usage, msg)
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Integrity check found `problems` problems
    pub fn check_failed(problems: usize) -> Self {
        Self::new(
            CliErrorCode::CheckFailed,
            format!("Library check failed with {} problem(s)", problems),
        )
    }

    /// A command panicked
    pub fn panicked(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::Panicked, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<GolError> for CliError {
    fn from(e: GolError) -> Self {
        let code = match (&e, e.kind()) {
            (GolError::InvalidConfig(_), _) => CliErrorCode::ConfigError,
            (_, ErrorKind::User) => CliErrorCode::QueryError,
            (_, ErrorKind::Internal) => CliErrorCode::IoError,
        };
        Self::new(code, e.to_string())
    }
}

impl From<clap::Error> for CliError {
    fn from(e: clap::Error) -> Self {
        use clap::error::ErrorKind as ClapKind;

        let message = e.render().to_string().trim_end().to_string();
        match e.kind() {
            ClapKind::InvalidValue | ClapKind::ValueValidation => Self::config_error(message),
            _ => Self::usage(message),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_command_message() {
        let err = CliError::unknown_command("bogus");
        assert_eq!(err.code(), &CliErrorCode::UnknownCommand);
        assert_eq!(err.to_string(), "GOL_CLI_UNKNOWN_COMMAND: Unknown command: bogus");
    }

    #[test]
    fn test_from_gol_error() {
        let err = CliError::from(GolError::InvalidFormat("svg".to_string()));
        assert_eq!(err.code_str(), "GOL_CLI_QUERY_ERROR");
        assert_eq!(err.message(), "Invalid format: svg");

        let err = CliError::from(GolError::InvalidConfig("port".to_string()));
        assert_eq!(err.code(), &CliErrorCode::ConfigError);

        let err = CliError::from(GolError::Internal("boom".to_string()));
        assert_eq!(err.code(), &CliErrorCode::IoError);
    }

    #[test]
    fn test_from_io_error() {
        let err = CliError::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        assert_eq!(err.code(), &CliErrorCode::IoError);
        assert!(err.message().contains("pipe closed"));
    }
}
