//! Tool probe port for external program detection.
//!
//! Core owns the trait and types; the runtime crate implements it by
//! searching `PATH` and running `--version`. The CLI injects the probe into
//! the `check-deps` handler.

use crate::domain::ToolDependency;

/// Port for discovering the external programs the probes shell out to.
pub trait ToolProbePort: Send + Sync {
    /// Check every external tool and return its status.
    fn check_tools(&self) -> Vec<ToolDependency>;
}
