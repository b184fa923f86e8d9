//! Check external tool handler.
//!
//! Reports the programs the built-in checks shell out to, which check kinds
//! need each one, and how to install whatever is missing.

mod display;

use std::io::Write;

use anyhow::Result;
use netcheck_core::{ToolDependency, ToolProbePort};

use display::{Palette, write_dependency};

/// Execute the check-deps command.
///
/// Returns an error if a required tool is missing. Optional tools only
/// disable the check kinds that use them.
pub fn execute(probe: &dyn ToolProbePort) -> Result<()> {
    let tools = probe.check_tools();
    let stdout = std::io::stdout();
    let missing = write_report(&mut stdout.lock(), &tools, Palette::for_stdout())?;

    if missing > 0 {
        anyhow::bail!("{missing} required tool(s) missing");
    }
    Ok(())
}

/// Write the status table and install hints; returns the number of
/// missing required tools.
pub fn write_report<W: Write>(
    out: &mut W,
    tools: &[ToolDependency],
    colors: Palette,
) -> std::io::Result<usize> {
    writeln!(out, "{}Checking external tools...{}\n", colors.bold, colors.reset)?;
    writeln!(
        out,
        "{} {:<11} {:<8} {:<24} {}{}",
        colors.bold, "TOOL", "CHECKS", "STATUS", "NOTES", colors.reset
    )?;
    writeln!(out, "{}", "=".repeat(72))?;

    for tool in tools {
        write_dependency(out, tool, colors)?;
    }
    writeln!(out, "{}", "=".repeat(72))?;

    let missing: Vec<&ToolDependency> = tools.iter().filter(|t| !t.is_present()).collect();
    let missing_required = missing.iter().filter(|t| t.required).count();

    if missing.is_empty() {
        writeln!(out, "{}✓ All tools are installed!{}", colors.green, colors.reset)?;
        return Ok(0);
    }

    if missing_required == 0 {
        writeln!(
            out,
            "{}○ All required tools are installed; some script checks are unavailable.{}",
            colors.yellow, colors.reset
        )?;
    } else {
        writeln!(
            out,
            "{}✗ {missing_required} required tool(s) missing.{}",
            colors.red, colors.reset
        )?;
    }

    writeln!(out, "\n{}To install:{}", colors.bold, colors.reset)?;
    for tool in missing {
        let hint = tool.install_hint.as_deref().unwrap_or("see the tool's documentation");
        writeln!(out, "  {:<11} {hint}", tool.name)?;
    }

    Ok(missing_required)
}

#[cfg(test)]
mod tests {
    use super::*;
    use netcheck_core::ToolStatus;

    struct FixedTools(Vec<ToolDependency>);

    impl ToolProbePort for FixedTools {
        fn check_tools(&self) -> Vec<ToolDependency> {
            self.0.clone()
        }
    }

    fn present(dep: ToolDependency) -> ToolDependency {
        dep.with_status(ToolStatus::Present {
            program: "tool".to_string(),
            version: "1.0".to_string(),
        })
    }

    fn report(tools: &[ToolDependency]) -> (String, usize) {
        let mut out = Vec::new();
        let missing = write_report(&mut out, tools, Palette::PLAIN).unwrap();
        (String::from_utf8(out).unwrap(), missing)
    }

    #[test]
    fn test_all_present() {
        let (text, missing) = report(&[present(ToolDependency::required("ping", "ICMP"))]);
        assert_eq!(missing, 0);
        assert!(text.contains("All tools are installed"));
        assert!(!text.contains("To install"));
    }

    #[test]
    fn test_missing_optional_lists_hint() {
        let tools = [
            present(ToolDependency::required("ping", "ICMP")),
            ToolDependency::optional("powershell", "PS scripts").with_hint("winget install Microsoft.PowerShell"),
        ];
        let (text, missing) = report(&tools);
        assert_eq!(missing, 0);
        assert!(text.contains("powershell  winget install Microsoft.PowerShell"));
    }

    #[test]
    fn test_missing_required_fails_command() {
        let probe = FixedTools(vec![ToolDependency::required("ping", "ICMP")]);
        let err = execute(&probe).unwrap_err();
        assert_eq!(err.to_string(), "1 required tool(s) missing");
    }
}
