//! Display utilities for tool status output.

use std::io::{IsTerminal, Write};

use netcheck_core::{ToolDependency, ToolStatus};

// ANSI color codes
pub const GREEN: &str = "\x1b[32m";
pub const RED: &str = "\x1b[31m";
pub const YELLOW: &str = "\x1b[33m";
pub const BOLD: &str = "\x1b[1m";
pub const RESET: &str = "\x1b[0m";

/// Color palette. [`Palette::PLAIN`] holds empty strings for piped output.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub green: &'static str,
    pub red: &'static str,
    pub yellow: &'static str,
    pub bold: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub const ANSI: Self = Self {
        green: GREEN,
        red: RED,
        yellow: YELLOW,
        bold: BOLD,
        reset: RESET,
    };

    pub const PLAIN: Self = Self {
        green: "",
        red: "",
        yellow: "",
        bold: "",
        reset: "",
    };

    /// ANSI colors only when writing to a terminal.
    pub const fn for_terminal(is_terminal: bool) -> Self {
        if is_terminal { Self::ANSI } else { Self::PLAIN }
    }

    /// Palette suited to the process's stdout.
    pub fn for_stdout() -> Self {
        Self::for_terminal(std::io::stdout().is_terminal())
    }
}

/// Write a single tool row in the status table.
pub fn write_dependency<W: Write>(
    out: &mut W,
    dep: &ToolDependency,
    colors: Palette,
) -> std::io::Result<()> {
    let status = match &dep.status {
        ToolStatus::Present { program, version } => {
            format!("{}✓ {program} {version}{}", colors.green, colors.reset)
        }
        ToolStatus::Missing if dep.required => format!("{}✗ missing{}", colors.red, colors.reset),
        ToolStatus::Missing => format!("{}○ missing{}", colors.yellow, colors.reset),
    };

    let marker = if dep.required {
        format!("{}*{}", colors.red, colors.reset)
    } else {
        " ".to_string()
    };

    writeln!(
        out,
        "{marker}{:<11} {:<8} {:<24} {}",
        dep.name,
        dep.used_by.join(","),
        status,
        dep.description
    )
}
