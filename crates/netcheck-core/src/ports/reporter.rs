//! Reporting port for the dispatch loop.
//!
//! The dispatch loop turns every probe outcome into exactly one event and
//! hands it to a [`CheckReporter`]. Adapters decide where events go; the
//! default [`TracingReporter`] writes one structured log line per event.

use tracing::{error, info};

use super::ProbeError;
use crate::domain::CheckKind;

/// Fields shared by every event about one target, for correlation.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    /// The target string as written in the config.
    pub host: &'a str,
    /// The normalized check kind.
    pub kind: &'a CheckKind,
    /// Display label for the kind (`Unknown` when unregistered).
    pub label: &'a str,
}

/// One reportable step of the dispatch loop.
#[derive(Debug)]
pub enum CheckEvent<'a> {
    /// About to run the probe.
    Checking(CheckContext<'a>),
    /// The probe passed.
    Passed(CheckContext<'a>),
    /// The probe failed without a diagnostic.
    Failed(CheckContext<'a>),
    /// The probe failed with a diagnostic.
    Errored {
        context: CheckContext<'a>,
        diagnostic: &'a ProbeError,
    },
    /// No probe is registered for the kind; the target was skipped.
    UnknownKind(CheckContext<'a>),
}

impl<'a> CheckEvent<'a> {
    /// The correlation fields of this event.
    pub const fn context(&self) -> &CheckContext<'a> {
        match self {
            Self::Checking(ctx) | Self::Passed(ctx) | Self::Failed(ctx) | Self::UnknownKind(ctx) => {
                ctx
            }
            Self::Errored { context, .. } => context,
        }
    }

    /// Fixed log message for the event.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Checking(_) => "checking host",
            Self::Passed(_) => "host passed check",
            Self::Failed(_) => "host failed check",
            Self::Errored { .. } => "check error",
            Self::UnknownKind(_) => "unknown check type",
        }
    }
}

/// Sink for dispatch loop events.
pub trait CheckReporter: Send + Sync {
    /// Record one event.
    fn report(&self, event: &CheckEvent<'_>);
}

/// Reporter that writes each event as a `tracing` log line.
///
/// Successful steps log at `INFO`, every failure at `ERROR`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl CheckReporter for TracingReporter {
    fn report(&self, event: &CheckEvent<'_>) {
        let ctx = event.context();
        let message = event.message();
        match event {
            CheckEvent::Checking(_) | CheckEvent::Passed(_) => info!(
                host = ctx.host,
                check_type = %ctx.kind,
                check_label = ctx.label,
                "{message}"
            ),
            CheckEvent::Failed(_) | CheckEvent::UnknownKind(_) => error!(
                host = ctx.host,
                check_type = %ctx.kind,
                check_label = ctx.label,
                "{message}"
            ),
            CheckEvent::Errored { diagnostic, .. } => error!(
                error = %diagnostic,
                host = ctx.host,
                check_type = %ctx.kind,
                check_label = ctx.label,
                "{message}"
            ),
        }
    }
}

/// Reporter that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl CheckReporter for NoopReporter {
    fn report(&self, _event: &CheckEvent<'_>) {}
}
