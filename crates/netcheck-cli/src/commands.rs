//! Subcommands.
//!
//! Running without a subcommand checks every host in the config file.

use clap::Subcommand;

/// Auxiliary commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Check the external tools the built-in checks rely on
    CheckDeps,

    /// List the check types this build understands
    ListChecks,
}
