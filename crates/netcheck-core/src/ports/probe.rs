//! Probe contract.
//!
//! Every check kind resolves to a value implementing [`Probe`]. The contract
//! is deliberately tiny: take the target string, return an outcome. Probes
//! never return `Err` past this boundary; transport failures, bad exit codes
//! and script contract violations all become [`ProbeOutcome::Error`].

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Diagnostic attached to a failed probe.
#[derive(Debug, Error)]
pub enum ProbeError {
    // === Subprocesses ===
    /// The program could not be started at all.
    #[error("failed to run {program}: {reason}")]
    Spawn { program: String, reason: String },

    /// The program ran but reported failure through its exit status.
    #[error("{program} exited with {status}")]
    ExitStatus { program: String, status: String },

    // === Network ===
    /// DNS, connect, TLS or protocol failure.
    #[error("{0}")]
    Transport(String),

    /// A response arrived but its status is outside the accepted set.
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),

    /// Two alternative checks both failed.
    #[error("both checks failed - {first}; {second}")]
    BothFailed { first: String, second: String },

    /// The probe gave up waiting.
    #[error("timed out after {after:?}")]
    Timeout { after: Duration },

    // === Scripts ===
    /// The target does not have the `<script> <argument>` shape.
    #[error(
        "invalid {language} check format: expected 'scriptname.{extension} hostname', got '{target}'"
    )]
    MalformedTarget {
        language: &'static str,
        extension: &'static str,
        target: String,
    },

    /// The script name would resolve outside the scripts directory.
    #[error("invalid {language} script name '{name}': scripts must live inside the scripts directory")]
    ScriptOutsideDir { language: &'static str, name: String },

    /// The script file does not exist.
    #[error("script not found: {}", path.display())]
    ScriptNotFound { path: PathBuf },

    /// None of the interpreter candidates is on the search path.
    #[error("{language} interpreter not found (tried: {tried})")]
    InterpreterNotFound { language: &'static str, tried: String },

    /// The script could not be loaded or raised an error while running.
    #[error("{language} script error: {reason}")]
    ScriptError { language: &'static str, reason: String },

    /// The script finished without assigning its required output.
    #[error("{language} script did not set '{variable}' variable")]
    MissingResult {
        language: &'static str,
        variable: &'static str,
    },

    /// The script reported failure, with its own explanation.
    #[error("{language} script failed: {detail}")]
    ScriptFailed { language: &'static str, detail: String },

    /// Failure inside the probe machinery itself.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result of one probe invocation.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// The target passed the check.
    Passed,
    /// The target failed and the probe has nothing to say about why.
    ///
    /// Only used as a last resort, e.g. a script that sets its result to
    /// false without an error message.
    Failed,
    /// The target failed with a diagnostic.
    Error(ProbeError),
}

impl ProbeOutcome {
    /// Whether the check passed.
    pub const fn passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Diagnostic for a failed check, if the probe produced one.
    pub const fn diagnostic(&self) -> Option<&ProbeError> {
        match self {
            Self::Error(err) => Some(err),
            Self::Passed | Self::Failed => None,
        }
    }
}

impl From<Result<(), ProbeError>> for ProbeOutcome {
    fn from(result: Result<(), ProbeError>) -> Self {
        match result {
            Ok(()) => Self::Passed,
            Err(err) => Self::Error(err),
        }
    }
}

/// A check implementation for one check kind.
///
/// Implementations must be safe to call repeatedly: no state may leak from
/// one invocation into the next.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Probe: Send + Sync {
    /// Run the check against `target`.
    async fn probe(&self, target: &str) -> ProbeOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_classification() {
        assert!(ProbeOutcome::Passed.passed());
        assert!(ProbeOutcome::Passed.diagnostic().is_none());

        assert!(!ProbeOutcome::Failed.passed());
        assert!(ProbeOutcome::Failed.diagnostic().is_none());

        let errored = ProbeOutcome::Error(ProbeError::UnexpectedStatus(503));
        assert!(!errored.passed());
        assert_eq!(
            errored.diagnostic().map(ToString::to_string).as_deref(),
            Some("unexpected status code: 503")
        );
    }

    #[test]
    fn test_outcome_from_result() {
        assert!(ProbeOutcome::from(Ok(())).passed());
        let outcome = ProbeOutcome::from(Err(ProbeError::Timeout {
            after: Duration::from_secs(5),
        }));
        assert_eq!(
            outcome.diagnostic().unwrap().to_string(),
            "timed out after 5s"
        );
    }

    #[test]
    fn test_script_error_messages() {
        let err = ProbeError::MissingResult {
            language: "lua",
            variable: "result",
        };
        assert_eq!(err.to_string(), "lua script did not set 'result' variable");

        let err = ProbeError::MalformedTarget {
            language: "python",
            extension: "py",
            target: "check.py".to_string(),
        };
        assert!(err.to_string().starts_with("invalid python check format"));

        let err = ProbeError::ScriptNotFound {
            path: PathBuf::from("scripts/missing.lua"),
        };
        assert_eq!(err.to_string(), "script not found: scripts/missing.lua");
    }

    #[test]
    fn test_both_failed_keeps_leg_order() {
        let err = ProbeError::BothFailed {
            first: "http: connection refused".to_string(),
            second: "https: unexpected status code: 500".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "both checks failed - http: connection refused; https: unexpected status code: 500"
        );
    }
}
