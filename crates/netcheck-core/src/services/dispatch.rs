//! Dispatch loop.
//!
//! Walks the target list in declaration order, one target at a time, and
//! turns every target into a *checking* event followed by exactly one
//! classification event. Nothing a single target does can stop the run.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{CheckTarget, RunSummary};
use crate::ports::{CheckContext, CheckEvent, CheckReporter, ProbeOutcome};
use crate::registry::CheckRegistry;

/// Sequential check runner.
pub struct CheckRunner {
    registry: Arc<CheckRegistry>,
    reporter: Arc<dyn CheckReporter>,
}

impl CheckRunner {
    /// Create a runner over a finished registry.
    pub fn new(registry: Arc<CheckRegistry>, reporter: Arc<dyn CheckReporter>) -> Self {
        Self { registry, reporter }
    }

    /// The registry this runner dispatches through.
    pub fn registry(&self) -> &CheckRegistry {
        &self.registry
    }

    /// Check every target, strictly in order, and count the outcomes.
    ///
    /// Each probe is awaited to completion before the next one starts.
    pub async fn run(&self, targets: &[CheckTarget]) -> RunSummary {
        let mut summary = RunSummary::default();

        for target in targets {
            self.check_one(target, &mut summary).await;
            summary.processed += 1;
        }

        debug!(
            processed = summary.processed,
            passed = summary.passed,
            failed = summary.failed,
            errored = summary.errored,
            unknown = summary.unknown,
            "check run finished"
        );
        summary
    }

    async fn check_one(&self, target: &CheckTarget, summary: &mut RunSummary) {
        let context = CheckContext {
            host: &target.target,
            kind: &target.kind,
            label: self.registry.display_label(&target.kind),
        };
        self.reporter.report(&CheckEvent::Checking(context));

        let Some(probe) = self.registry.probe_for(&target.kind) else {
            summary.unknown += 1;
            self.reporter.report(&CheckEvent::UnknownKind(context));
            return;
        };

        match probe.probe(&target.target).await {
            ProbeOutcome::Passed => {
                summary.passed += 1;
                self.reporter.report(&CheckEvent::Passed(context));
            }
            ProbeOutcome::Failed => {
                summary.failed += 1;
                self.reporter.report(&CheckEvent::Failed(context));
            }
            ProbeOutcome::Error(diagnostic) => {
                summary.errored += 1;
                self.reporter.report(&CheckEvent::Errored {
                    context,
                    diagnostic: &diagnostic,
                });
            }
        }
    }
}
