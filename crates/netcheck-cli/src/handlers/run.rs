//! Default command: check every host in the config file.

use std::io::{BufRead, Write};

use anyhow::Result;
use netcheck_core::{RunSummary, load_targets};
use tracing::{info, warn};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Prompt shown after an interactive run.
pub const EXIT_PROMPT: &str = "Press any key to exit...";

/// Load the config, run every check in order and log the totals.
///
/// Only an unreadable config file fails the command. Malformed lines are
/// logged and skipped; check failures are reported per host.
pub async fn execute(ctx: &CliContext) -> Result<RunSummary> {
    let path = &ctx.config.config_path;
    info!(config = %path.display(), "starting up");

    let parsed = load_targets(path).map_err(CliError::from)?;
    for rejected in &parsed.rejected {
        warn!(config = %path.display(), error = %rejected, "skipping config line");
    }

    let summary = ctx.runner.run(&parsed.targets).await;

    info!(
        host_count = summary.processed,
        config = %path.display(),
        "config parsed"
    );
    if !summary.all_passed() {
        info!(
            passed = summary.passed,
            not_passed = summary.not_passed(),
            "some checks did not pass"
        );
    }

    Ok(summary)
}

/// Print [`EXIT_PROMPT`] and wait for a line of input (or end of input).
pub fn wait_for_exit<R: BufRead, W: Write>(mut input: R, mut output: W) -> std::io::Result<()> {
    write!(output, "{EXIT_PROMPT}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}
