//! Config source errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading the check list.
///
/// Per-line problems ([`ConfigError::InvalidKind`], [`ConfigError::InvalidLine`])
/// only disqualify that line. Failing to open or read the source is fatal
/// for the whole run.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A check kind code failed validation.
    #[error("invalid check kind '{code}': {reason}")]
    InvalidKind { code: String, reason: String },

    /// A line does not have the `<kind> <target>` shape.
    #[error("invalid format on line {line}: must be '2-4 char checktype hostname', got '{content}'")]
    InvalidLine { line: usize, content: String },

    /// The config source could not be opened.
    #[error("open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config source could not be read to the end.
    #[error("scan {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Whether this error ends the run rather than a single line.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Open { .. } | Self::Read { .. })
    }
}
