//! External tool dependency types.
//!
//! Several probes shell out to programs installed on the host (ping, script
//! interpreters). These types describe whether such a program is available.

/// Availability of an external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStatus {
    /// Found on the search path.
    Present { program: String, version: String },
    /// Not found under any of its names.
    Missing,
}

/// An external program that one or more check kinds rely on.
#[derive(Debug, Clone)]
pub struct ToolDependency {
    /// Display name (e.g. "python").
    pub name: String,
    /// Check kind codes that need this tool.
    pub used_by: Vec<String>,
    /// What the tool is used for.
    pub description: String,
    /// Whether the built-in checks are unusable without it.
    pub required: bool,
    /// Current status of the tool.
    pub status: ToolStatus,
    /// Installation hint for the current platform.
    pub install_hint: Option<String>,
}

impl ToolDependency {
    /// A tool the built-in network checks need.
    pub fn required(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            used_by: Vec::new(),
            description: description.into(),
            required: true,
            status: ToolStatus::Missing,
            install_hint: None,
        }
    }

    /// A tool only some script checks need.
    pub fn optional(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(name, description)
        }
    }

    /// Record which check kinds use the tool.
    #[must_use]
    pub fn used_by(mut self, kinds: &[&str]) -> Self {
        self.used_by = kinds.iter().map(|k| (*k).to_string()).collect();
        self
    }

    /// Set installation hint.
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.install_hint = Some(hint.into());
        self
    }

    /// Set the status of this tool.
    #[must_use]
    pub fn with_status(mut self, status: ToolStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the tool was found.
    pub const fn is_present(&self) -> bool {
        matches!(self.status, ToolStatus::Present { .. })
    }
}
