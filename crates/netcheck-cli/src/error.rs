//! CLI-specific error types and mappings.
//!
//! Library errors are folded into `CliError`, which decides the process
//! exit code.

use netcheck_core::{ConfigError, RegistryError, SettingsError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Flag or environment values that describe unusable settings.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Config source or transcript could not be opened or read.
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Anything else that stops the run before it starts.
    #[error("{0}")]
    Core(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where one fits:
    /// - 1: General error
    /// - 2: Invalid arguments (EX_USAGE)
    /// - 74: I/O error (EX_IOERR)
    /// - 78: Configuration error (EX_CONFIG)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2,
            Self::Io(_) => 74,
            Self::Config(_) => 78,
        }
    }
}

/// Exit code for an error returned by a handler.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<CliError>().map_or(1, CliError::exit_code)
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Arguments(err.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        if err.is_fatal() {
            Self::Io(err.to_string())
        } else {
            Self::Config(err.to_string())
        }
    }
}

impl From<RegistryError> for CliError {
    fn from(err: RegistryError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
