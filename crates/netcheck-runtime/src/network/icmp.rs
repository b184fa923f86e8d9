//! ICMP reachability through the system `ping`.
//!
//! Sends a single echo request and passes on a zero exit status. Output is
//! discarded; nothing about it is parsed.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use netcheck_core::{Probe, ProbeError, ProbeOutcome};
use tokio::process::Command;
use tracing::debug;

use crate::process::{combined_output, run_bounded};

/// Program used when none is configured.
pub const DEFAULT_PING_PROGRAM: &str = "ping";

/// Slack on top of the reply wait before the child is killed.
pub const PING_GRACE: Duration = Duration::from_secs(3);

/// Command-line dialect of the platform's `ping`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingFlavor {
    /// `ping -n 1 -w <ms>`
    Windows,
    /// `ping -c 1 -t <secs>`; BSD `-W` takes milliseconds.
    MacOs,
    /// `ping -c 1 -W <secs>`
    Unix,
}

impl PingFlavor {
    /// Dialect of the platform this binary was built for.
    pub const fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Unix
        }
    }

    /// Arguments for one echo request to `host`, waiting at most `wait`.
    pub fn args(self, wait: Duration, host: &str) -> Vec<String> {
        // Unix dialects only take whole seconds.
        let secs = wait.as_millis().div_ceil(1000).max(1).to_string();
        let (count_flag, wait_flag, wait_value) = match self {
            Self::Windows => ("-n", "-w", wait.as_millis().to_string()),
            Self::MacOs => ("-c", "-t", secs),
            Self::Unix => ("-c", "-W", secs),
        };
        vec![
            count_flag.to_string(),
            "1".to_string(),
            wait_flag.to_string(),
            wait_value,
            host.to_string(),
        ]
    }
}

/// Probe for the `ICMP` check kind.
#[derive(Debug, Clone)]
pub struct IcmpProbe {
    program: String,
    flavor: PingFlavor,
    wait: Duration,
}

impl IcmpProbe {
    /// Ping with the platform dialect, waiting `wait` for the reply.
    pub fn new(wait: Duration) -> Self {
        Self {
            program: DEFAULT_PING_PROGRAM.to_string(),
            flavor: PingFlavor::current(),
            wait,
        }
    }

    /// Run a different program with the same arguments.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Use a specific argument dialect.
    #[must_use]
    pub const fn with_flavor(mut self, flavor: PingFlavor) -> Self {
        self.flavor = flavor;
        self
    }

    /// Hard limit on one invocation.
    pub fn deadline(&self) -> Duration {
        self.wait + PING_GRACE
    }
}

#[async_trait]
impl Probe for IcmpProbe {
    async fn probe(&self, target: &str) -> ProbeOutcome {
        let args = self.flavor.args(self.wait, target);
        debug!(program = %self.program, ?args, "pinging host");

        let mut command = Command::new(&self.program);
        command.args(&args).stdin(Stdio::null());

        let output = match run_bounded(&mut command, &self.program, Some(self.deadline())).await {
            Ok(output) => output,
            Err(err) => return ProbeOutcome::Error(err),
        };

        if output.status.success() {
            ProbeOutcome::Passed
        } else {
            debug!(host = target, output = %combined_output(&output), "ping failed");
            ProbeOutcome::Error(ProbeError::ExitStatus {
                program: self.program.clone(),
                status: output.status.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_per_platform() {
        let wait = Duration::from_millis(2000);
        assert_eq!(
            PingFlavor::Windows.args(wait, "10.0.0.1"),
            ["-n", "1", "-w", "2000", "10.0.0.1"]
        );
        assert_eq!(
            PingFlavor::MacOs.args(wait, "10.0.0.1"),
            ["-c", "1", "-t", "2", "10.0.0.1"]
        );
        assert_eq!(
            PingFlavor::Unix.args(wait, "10.0.0.1"),
            ["-c", "1", "-W", "2", "10.0.0.1"]
        );
    }

    #[test]
    fn test_sub_second_wait_rounds_up() {
        let args = PingFlavor::Unix.args(Duration::from_millis(1500), "h");
        assert_eq!(args[3], "2");
        let args = PingFlavor::Unix.args(Duration::from_millis(1), "h");
        assert_eq!(args[3], "1");
    }

    #[test]
    fn test_deadline_includes_grace() {
        let probe = IcmpProbe::new(Duration::from_secs(2));
        assert_eq!(probe.deadline(), Duration::from_secs(5));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_zero_exit_passes() {
        let probe = IcmpProbe::new(Duration::from_millis(100)).with_program("true");
        assert!(probe.probe("127.0.0.1").await.passed());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_error() {
        let probe = IcmpProbe::new(Duration::from_millis(100)).with_program("false");
        let outcome = probe.probe("192.0.2.1").await;
        let diagnostic = outcome.diagnostic().unwrap().to_string();
        assert!(diagnostic.starts_with("false exited with"), "{diagnostic}");
    }

    #[tokio::test]
    async fn test_missing_program_is_error() {
        let probe =
            IcmpProbe::new(Duration::from_millis(100)).with_program("netcheck-no-such-ping");
        let outcome = probe.probe("127.0.0.1").await;
        assert!(matches!(
            outcome,
            ProbeOutcome::Error(ProbeError::Spawn { .. })
        ));
    }
}
