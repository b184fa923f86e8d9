//! List the registered check kinds.

use std::io::{IsTerminal, Write};

use anyhow::Result;
use netcheck_core::CheckRegistry;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Execute the list-checks command.
pub fn execute(registry: &CheckRegistry) -> Result<()> {
    let stdout = std::io::stdout();
    let styled = stdout.is_terminal();
    write_checks(&mut stdout.lock(), registry, styled)?;
    Ok(())
}

/// Write one `CODE  Label` row per registered kind, ordered by code.
pub fn write_checks<W: Write>(
    out: &mut W,
    registry: &CheckRegistry,
    styled: bool,
) -> std::io::Result<()> {
    let (bold, reset) = if styled { (BOLD, RESET) } else { ("", "") };
    writeln!(out, "{bold}{:<6} {}{reset}", "CODE", "CHECK")?;
    for (kind, entry) in registry.iter() {
        writeln!(out, "{:<6} {}", kind.as_str(), entry.label())?;
    }
    Ok(())
}
