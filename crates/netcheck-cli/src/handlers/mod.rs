//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub fn execute(...) -> Result<()>` (async where they probe)
//! - Thin wrappers that take what they need from `CliContext`, call into the
//!   core, and format output for the terminal

pub mod check_deps;
pub mod list_checks;
pub mod run;
