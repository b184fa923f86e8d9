//! Check targets produced by the config parser.

use super::CheckKind;

/// One `(kind, target)` pair to be checked.
///
/// The target string is opaque to the core: network probes read it as a
/// host name, script probes split it into a script name and an argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckTarget {
    /// Which probe to run.
    pub kind: CheckKind,
    /// What to run it against.
    pub target: String,
    /// 1-based line in the config source, if the target came from one.
    pub line: Option<usize>,
}

impl CheckTarget {
    /// Create a target that did not come from a config file.
    pub fn new(kind: CheckKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
            line: None,
        }
    }

    /// Record the config line this target was read from.
    #[must_use]
    pub const fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}
