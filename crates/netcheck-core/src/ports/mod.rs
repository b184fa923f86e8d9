//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core expects from adapters.
//!
//! # Design Rules
//!
//! - No reqwest, process or interpreter types in any signature
//! - Probes report through values, never through `Err`
//! - Reporting is a side channel; it cannot change the outcome of a run

pub mod probe;
pub mod reporter;
pub mod tool_probe;

pub use probe::{Probe, ProbeError, ProbeOutcome};
pub use reporter::{CheckContext, CheckEvent, CheckReporter, NoopReporter, TracingReporter};
pub use tool_probe::ToolProbePort;

#[cfg(test)]
pub use probe::MockProbe;
