//! Script checks run by an external interpreter.
//!
//! Only the exit status decides the outcome. Output is kept solely to
//! explain a failure.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use netcheck_core::{Probe, ProbeError, ProbeOutcome};
use tokio::process::Command;
use tracing::debug;

use super::target::ScriptTarget;
use crate::process::{combined_output, run_bounded};

/// How to find and invoke one script language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterSpec {
    /// Name used in diagnostics.
    pub language: &'static str,
    /// Script file extension, without the dot.
    pub extension: &'static str,
    /// Program names tried on `PATH`, in order.
    pub candidates: &'static [&'static str],
    /// Arguments placed before the script path.
    pub leading_args: &'static [&'static str],
}

/// `PY` checks.
pub const PYTHON: InterpreterSpec = InterpreterSpec {
    language: "python",
    extension: "py",
    candidates: &["python3", "python"],
    leading_args: &[],
};

/// `PS` checks.
pub const POWERSHELL: InterpreterSpec = InterpreterSpec {
    language: "powershell",
    extension: "ps1",
    candidates: &["pwsh", "powershell"],
    leading_args: &["-NoProfile", "-NonInteractive", "-File"],
};

impl InterpreterSpec {
    /// First candidate found on `PATH`.
    pub fn resolve(&self) -> Result<PathBuf, ProbeError> {
        self.candidates
            .iter()
            .find_map(|candidate| which::which(candidate).ok())
            .ok_or_else(|| ProbeError::InterpreterNotFound {
                language: self.language,
                tried: self.candidates.join(", "),
            })
    }
}

/// Probe running `<interpreter> [leading args] <script> <argument>`.
#[derive(Debug, Clone)]
pub struct InterpreterProbe {
    spec: InterpreterSpec,
    scripts_dir: PathBuf,
    timeout: Option<Duration>,
}

impl InterpreterProbe {
    /// Probe resolving scripts under `scripts_dir`; `None` disables the deadline.
    pub fn new(
        spec: InterpreterSpec,
        scripts_dir: impl Into<PathBuf>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            spec,
            scripts_dir: scripts_dir.into(),
            timeout,
        }
    }

    /// Interpreter this probe runs.
    pub const fn spec(&self) -> &InterpreterSpec {
        &self.spec
    }

    async fn run(&self, target: &str) -> Result<(), ProbeError> {
        let spec = &self.spec;
        let script = ScriptTarget::parse(target, spec.language, spec.extension, &self.scripts_dir)?;
        let interpreter = spec.resolve()?;
        let program = interpreter.display().to_string();

        debug!(
            interpreter = %program,
            script = %script.path.display(),
            argument = %script.argument,
            "running {} check",
            spec.language
        );

        let mut command = Command::new(&interpreter);
        command
            .args(spec.leading_args)
            .arg(&script.path)
            .arg(&script.argument)
            .stdin(Stdio::null());

        let output = run_bounded(&mut command, &program, self.timeout).await?;
        if output.status.success() {
            return Ok(());
        }

        let text = combined_output(&output);
        Err(ProbeError::ScriptFailed {
            language: spec.language,
            detail: if text.is_empty() {
                output.status.to_string()
            } else {
                text
            },
        })
    }
}

#[async_trait]
impl Probe for InterpreterProbe {
    async fn probe(&self, target: &str) -> ProbeOutcome {
        self.run(target).await.into()
    }
}
