//! Program discovery and version extraction.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// First of `candidates` found on `PATH`, with its resolved location.
pub fn locate(candidates: &[&str]) -> Option<(String, PathBuf)> {
    candidates.iter().find_map(|candidate| {
        which::which(candidate)
            .ok()
            .map(|path| ((*candidate).to_string(), path))
    })
}

/// First non-empty output line of `program <flag>`.
pub fn get_command_version(program: &Path, flag: &str) -> Option<String> {
    let output = Command::new(program)
        .arg(flag)
        .stdin(Stdio::null())
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    // Some tools print their version on stderr
    let text = if stdout.trim().is_empty() {
        stderr
    } else {
        stdout
    };

    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// First whitespace-separated word that starts with a digit.
///
/// "Python 3.12.1" -> "3.12.1", "ping from iputils 20211215" -> "20211215",
/// "PowerShell 7.4.0" -> "7.4.0"
pub fn extract_version(line: &str) -> Option<String> {
    line.split_whitespace()
        .find(|word| word.chars().next().is_some_and(|c| c.is_ascii_digit()))
        .map(|word| word.trim_end_matches([',', ')']).to_string())
}
