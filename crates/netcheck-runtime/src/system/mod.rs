//! Tool probe implementation for netcheck-runtime.
//!
//! `DefaultToolProbe` implements `ToolProbePort` from netcheck-core by
//! searching `PATH` for the programs the probes shell out to and asking each
//! one for its version.

mod commands;

use netcheck_core::{ToolDependency, ToolProbePort, ToolStatus};

use crate::script::{InterpreterSpec, POWERSHELL, PYTHON};
use commands::{extract_version, get_command_version, locate};

/// Default implementation of `ToolProbePort`.
///
/// Constructed by the CLI and handed to the `check-deps` handler.
pub struct DefaultToolProbe;

impl DefaultToolProbe {
    /// Probe for the tools the built-in checks rely on.
    pub const fn new() -> Self {
        Self
    }
}

impl Default for DefaultToolProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolProbePort for DefaultToolProbe {
    fn check_tools(&self) -> Vec<ToolDependency> {
        vec![
            ToolDependency::required("ping", "ICMP reachability checks")
                .used_by(&["ICMP"])
                .with_hint(ping_hint())
                // Only iputils understands -V; others still count as present
                .with_status(status_of(&["ping"], "-V")),
            interpreter_dependency(&PYTHON, "Runs Python check scripts", &["PY"])
                .with_hint(python_hint()),
            interpreter_dependency(&POWERSHELL, "Runs PowerShell check scripts", &["PS"])
                .with_hint(powershell_hint()),
            ToolDependency::optional("uv", "Manages packages imported by Python check scripts")
                .used_by(&["PY"])
                .with_hint("https://docs.astral.sh/uv/getting-started/installation/")
                .with_status(status_of(&["uv"], "--version")),
        ]
    }
}

fn interpreter_dependency(
    spec: &InterpreterSpec,
    description: &str,
    used_by: &[&str],
) -> ToolDependency {
    ToolDependency::optional(spec.language, description)
        .used_by(used_by)
        .with_status(status_of(spec.candidates, "--version"))
}

fn status_of(candidates: &[&str], version_flag: &str) -> ToolStatus {
    let Some((program, path)) = locate(candidates) else {
        return ToolStatus::Missing;
    };
    let version = get_command_version(&path, version_flag)
        .and_then(|line| extract_version(&line))
        .unwrap_or_else(|| "installed".to_string());
    ToolStatus::Present { program, version }
}

fn ping_hint() -> &'static str {
    if cfg!(target_os = "linux") {
        "apt install iputils-ping"
    } else {
        "ships with the operating system"
    }
}

fn python_hint() -> &'static str {
    if cfg!(target_os = "windows") {
        "winget install Python.Python.3.12"
    } else if cfg!(target_os = "macos") {
        "brew install python"
    } else {
        "apt install python3"
    }
}

fn powershell_hint() -> &'static str {
    if cfg!(target_os = "windows") {
        "winget install Microsoft.PowerShell"
    } else if cfg!(target_os = "macos") {
        "brew install powershell/tap/powershell"
    } else {
        "https://learn.microsoft.com/powershell/scripting/install/installing-powershell-on-linux"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_every_tool_once() {
        let tools = DefaultToolProbe::new().check_tools();
        let names: Vec<_> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["ping", "python", "powershell", "uv"]);
        assert!(tools.iter().all(|t| t.install_hint.is_some()));
        assert!(tools[0].required);
        assert!(tools[1..].iter().all(|t| !t.required));
    }

    #[test]
    fn test_missing_tool_status() {
        assert_eq!(
            status_of(&["netcheck-no-such-tool"], "--version"),
            ToolStatus::Missing
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_present_tool_without_version_output() {
        // `true --version` prints nothing on some systems and a banner on others
        let ToolStatus::Present { program, version } = status_of(&["true"], "--version") else {
            panic!("true should be on PATH");
        };
        assert_eq!(program, "true");
        assert!(!version.is_empty());
    }
}
