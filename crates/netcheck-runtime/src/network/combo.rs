//! Combined HTTP-then-HTTPS probe.

use std::sync::Arc;

use async_trait::async_trait;
use netcheck_core::{Probe, ProbeError, ProbeOutcome};
use tracing::debug;

struct Leg {
    name: &'static str,
    probe: Arc<dyn Probe>,
}

impl Leg {
    async fn run(&self, target: &str) -> Result<(), String> {
        match self.probe.probe(target).await {
            ProbeOutcome::Passed => Ok(()),
            ProbeOutcome::Failed => Err(format!("{}: check failed", self.name)),
            ProbeOutcome::Error(err) => Err(format!("{}: {err}", self.name)),
        }
    }
}

/// Probe for the `COMB` check kind.
///
/// Runs the first leg and only falls back to the second when it fails. The
/// target fails only when both legs do.
pub struct ComboProbe {
    first: Leg,
    second: Leg,
}

impl ComboProbe {
    /// HTTP first, HTTPS second.
    pub fn new(http: Arc<dyn Probe>, https: Arc<dyn Probe>) -> Self {
        Self::with_legs(("http", http), ("https", https))
    }

    /// Arbitrary legs; names prefix each leg's diagnostic.
    pub fn with_legs(
        first: (&'static str, Arc<dyn Probe>),
        second: (&'static str, Arc<dyn Probe>),
    ) -> Self {
        Self {
            first: Leg {
                name: first.0,
                probe: first.1,
            },
            second: Leg {
                name: second.0,
                probe: second.1,
            },
        }
    }
}

#[async_trait]
impl Probe for ComboProbe {
    async fn probe(&self, target: &str) -> ProbeOutcome {
        let first = match self.first.run(target).await {
            Ok(()) => return ProbeOutcome::Passed,
            Err(diagnostic) => diagnostic,
        };
        debug!(host = target, leg = self.first.name, error = %first, "first leg failed");

        match self.second.run(target).await {
            Ok(()) => ProbeOutcome::Passed,
            Err(second) => ProbeOutcome::Error(ProbeError::BothFailed { first, second }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Scripted {
        outcome: fn() -> ProbeOutcome,
        calls: AtomicUsize,
    }

    impl Scripted {
        fn new(outcome: fn() -> ProbeOutcome) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Probe for Scripted {
        async fn probe(&self, _target: &str) -> ProbeOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)()
        }
    }

    fn refused() -> ProbeOutcome {
        ProbeOutcome::Error(ProbeError::Transport("connection refused".to_string()))
    }

    #[tokio::test]
    async fn test_first_leg_pass_skips_second() {
        let http = Scripted::new(|| ProbeOutcome::Passed);
        let https = Scripted::new(|| ProbeOutcome::Passed);
        let combo = ComboProbe::new(http.clone(), https.clone());

        assert!(combo.probe("example.test").await.passed());
        assert_eq!(http.calls(), 1);
        assert_eq!(https.calls(), 0);
    }

    #[tokio::test]
    async fn test_second_leg_rescues() {
        let http = Scripted::new(refused);
        let https = Scripted::new(|| ProbeOutcome::Passed);
        let combo = ComboProbe::new(http.clone(), https.clone());

        assert!(combo.probe("example.test").await.passed());
        assert_eq!(https.calls(), 1);
    }

    #[tokio::test]
    async fn test_both_legs_fail_with_prefixed_diagnostics() {
        let http = Scripted::new(refused);
        let https = Scripted::new(|| ProbeOutcome::Error(ProbeError::UnexpectedStatus(500)));
        let combo = ComboProbe::new(http, https);

        let outcome = combo.probe("example.test").await;
        assert_eq!(
            outcome.diagnostic().unwrap().to_string(),
            "both checks failed - http: connection refused; https: unexpected status code: 500"
        );
    }

    #[tokio::test]
    async fn test_failed_without_diagnostic_still_reports() {
        let combo = ComboProbe::with_legs(
            ("a", Scripted::new(|| ProbeOutcome::Failed)),
            ("b", Scripted::new(|| ProbeOutcome::Failed)),
        );
        let outcome = combo.probe("example.test").await;
        assert_eq!(
            outcome.diagnostic().unwrap().to_string(),
            "both checks failed - a: check failed; b: check failed"
        );
    }
}
