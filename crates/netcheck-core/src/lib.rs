#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod ports;
pub mod registry;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use config::{ConfigError, ParsedConfig, load_targets, parse_line, parse_reader};
pub use domain::{CheckKind, CheckTarget, RunSummary, ToolDependency, ToolStatus};
pub use ports::{
    CheckContext, CheckEvent, CheckReporter, NoopReporter, Probe, ProbeError, ProbeOutcome,
    ToolProbePort, TracingReporter,
};
pub use registry::{CheckRegistry, CheckRegistryBuilder, RegistryEntry, RegistryError, UNKNOWN_LABEL};
pub use services::CheckRunner;
pub use settings::{
    DEFAULT_CONFIG_FILE, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_PING_WAIT_MS,
    DEFAULT_SCRIPT_TIMEOUT_SECS, DEFAULT_SCRIPTS_DIR, ProbeSettings, SettingsError,
    validate_settings,
};

// Dev-dependency only used by integration tests
#[cfg(test)]
use tempfile as _;
