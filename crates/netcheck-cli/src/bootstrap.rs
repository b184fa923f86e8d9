//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where the probe adapters are wired into the
//! core: settings are validated, the built-in registry is assembled from
//! netcheck-runtime and handed to a `CheckRunner` with the tracing reporter.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use netcheck_core::{
    CheckRegistry, CheckRunner, DEFAULT_CONFIG_FILE, DEFAULT_HTTP_TIMEOUT_SECS,
    DEFAULT_PING_WAIT_MS, DEFAULT_SCRIPT_TIMEOUT_SECS, DEFAULT_SCRIPTS_DIR, ProbeSettings,
    TracingReporter, validate_settings,
};
use netcheck_runtime::default_registry;

use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Config file listing the checks.
    pub config_path: PathBuf,
    /// Skip the exit prompt.
    pub batch: bool,
    /// Directory script checks resolve against.
    pub scripts_dir: PathBuf,
    /// HTTP/HTTPS request timeout.
    pub http_timeout_secs: u64,
    /// Ping reply wait.
    pub ping_wait_ms: u64,
    /// Script deadline, 0 for none.
    pub script_timeout_secs: u64,
}

impl CliConfig {
    /// Create config with default paths and timeouts.
    pub fn with_defaults() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_FILE),
            batch: false,
            scripts_dir: PathBuf::from(DEFAULT_SCRIPTS_DIR),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            ping_wait_ms: DEFAULT_PING_WAIT_MS,
            script_timeout_secs: DEFAULT_SCRIPT_TIMEOUT_SECS,
        }
    }

    /// Probe settings described by this config.
    pub fn probe_settings(&self) -> ProbeSettings {
        let mut settings = ProbeSettings::with_defaults()
            .with_scripts_dir(&self.scripts_dir)
            .with_script_timeout_secs(self.script_timeout_secs);
        settings.http_timeout = Duration::from_secs(self.http_timeout_secs);
        settings.ping_wait = Duration::from_millis(self.ping_wait_ms);
        settings
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// Configuration the context was built from.
    pub config: CliConfig,
    /// Built-in check table.
    pub registry: Arc<CheckRegistry>,
    /// Sequential runner over `registry`.
    pub runner: CheckRunner,
}

impl CliContext {
    /// Access the check registry.
    pub fn registry(&self) -> &CheckRegistry {
        &self.registry
    }
}

/// Bootstrap the CLI application.
///
/// Fails before any check runs when the settings are unusable.
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    let settings = config.probe_settings();
    validate_settings(&settings)?;

    let registry = Arc::new(default_registry(&settings)?);
    tracing::debug!(checks = registry.len(), ?settings, "registry ready");

    let runner = CheckRunner::new(Arc::clone(&registry), Arc::new(TracingReporter));

    Ok(CliContext {
        config,
        registry,
        runner,
    })
}
