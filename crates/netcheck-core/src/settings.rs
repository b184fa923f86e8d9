//! Probe settings and validation.
//!
//! Pure values with no infrastructure dependencies. The CLI fills them from
//! flags and environment; the runtime crate reads them when it builds the
//! default registry.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "netcheck.txt";

/// Default directory script checks are looked up in.
pub const DEFAULT_SCRIPTS_DIR: &str = "scripts";

/// Default total timeout of one HTTP or HTTPS request.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 5;

/// Default time ping waits for its single echo reply.
pub const DEFAULT_PING_WAIT_MS: u64 = 2000;

/// Default deadline for one script check (0 disables it).
pub const DEFAULT_SCRIPT_TIMEOUT_SECS: u64 = 60;

/// Errors from settings validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// HTTP timeout of zero would fail every request.
    #[error("HTTP timeout must be greater than zero")]
    ZeroHttpTimeout,

    /// Ping wait below one millisecond.
    #[error("ping wait must be at least 1ms")]
    ZeroPingWait,

    /// Scripts directory path is empty.
    #[error("scripts directory must not be empty")]
    EmptyScriptsDir,
}

/// Tunables for the built-in probes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSettings {
    /// Directory script checks are resolved against.
    pub scripts_dir: PathBuf,
    /// Total timeout of one HTTP/HTTPS request.
    pub http_timeout: Duration,
    /// How long ping waits for its reply.
    pub ping_wait: Duration,
    /// Deadline for one script check; `None` waits indefinitely.
    pub script_timeout: Option<Duration>,
}

impl ProbeSettings {
    /// Settings with the documented defaults.
    pub fn with_defaults() -> Self {
        Self {
            scripts_dir: PathBuf::from(DEFAULT_SCRIPTS_DIR),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            ping_wait: Duration::from_millis(DEFAULT_PING_WAIT_MS),
            script_timeout: Some(Duration::from_secs(DEFAULT_SCRIPT_TIMEOUT_SECS)),
        }
    }

    /// Set the scripts directory.
    #[must_use]
    pub fn with_scripts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scripts_dir = dir.into();
        self
    }

    /// Set the script deadline from seconds, where 0 means no deadline.
    #[must_use]
    pub const fn with_script_timeout_secs(mut self, secs: u64) -> Self {
        self.script_timeout = if secs == 0 {
            None
        } else {
            Some(Duration::from_secs(secs))
        };
        self
    }
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Check that settings describe usable probes.
pub fn validate_settings(settings: &ProbeSettings) -> Result<(), SettingsError> {
    if settings.http_timeout.is_zero() {
        return Err(SettingsError::ZeroHttpTimeout);
    }
    if settings.ping_wait < Duration::from_millis(1) {
        return Err(SettingsError::ZeroPingWait);
    }
    if settings.scripts_dir.as_os_str().is_empty() {
        return Err(SettingsError::EmptyScriptsDir);
    }
    Ok(())
}
