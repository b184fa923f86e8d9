//! Bounded subprocess execution shared by the ping and interpreter probes.

use std::process::Output;
use std::time::Duration;

use netcheck_core::ProbeError;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Run `command` to completion, killing it if `limit` passes first.
///
/// Stdout and stderr are always piped and captured; only stdin follows the
/// caller's configuration. The child is killed when the wait is abandoned.
pub(crate) async fn run_bounded(
    command: &mut Command,
    program: &str,
    limit: Option<Duration>,
) -> Result<Output, ProbeError> {
    command.kill_on_drop(true);
    let output = command.output();

    let result = match limit {
        Some(limit) => timeout(limit, output).await.map_err(|_| {
            debug!(program, ?limit, "subprocess killed after deadline");
            ProbeError::Timeout { after: limit }
        })?,
        None => output.await,
    };

    result.map_err(|e| ProbeError::Spawn {
        program: program.to_string(),
        reason: e.to_string(),
    })
}

/// Stdout followed by stderr, lossily decoded and trimmed.
pub(crate) fn combined_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    match (stdout.trim(), stderr.trim()) {
        (out, "") => out.to_string(),
        ("", err) => err.to_string(),
        (out, err) => format!("{out}\n{err}"),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::process::Stdio;

    #[tokio::test]
    async fn test_captures_both_streams_in_order() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo out; echo err >&2; exit 4"]);
        let output = run_bounded(&mut cmd, "sh", None).await.unwrap();
        assert_eq!(output.status.code(), Some(4));
        assert_eq!(combined_output(&output), "out\nerr");
    }

    #[tokio::test]
    async fn test_single_stream_and_blank_output() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "printf '\\n  only err  \\n\\n' >&2"]);
        let output = run_bounded(&mut cmd, "sh", None).await.unwrap();
        assert_eq!(combined_output(&output), "only err");

        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo; echo multi; echo line; echo"]);
        let output = run_bounded(&mut cmd, "sh", None).await.unwrap();
        assert_eq!(combined_output(&output), "multi\nline");

        let mut cmd = Command::new("true");
        let output = run_bounded(&mut cmd, "true", None).await.unwrap();
        assert_eq!(combined_output(&output), "");
    }

    #[tokio::test]
    async fn test_deadline_kills_child() {
        let mut cmd = Command::new("sleep");
        cmd.arg("5").stdin(Stdio::null());
        let started = std::time::Instant::now();
        let err = run_bounded(&mut cmd, "sleep", Some(Duration::from_millis(150)))
            .await
            .unwrap_err();
        assert!(matches!(err, ProbeError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let mut cmd = Command::new("netcheck-definitely-missing-program");
        let err = run_bounded(&mut cmd, "netcheck-definitely-missing-program", None)
            .await
            .unwrap_err();
        assert!(
            err.to_string()
                .starts_with("failed to run netcheck-definitely-missing-program:")
        );
    }
}
