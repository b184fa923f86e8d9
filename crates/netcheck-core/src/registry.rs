//! Check registry.
//!
//! One table maps each check kind to its probe *and* its display label, so
//! the two can never drift apart. The table is assembled once through
//! [`CheckRegistryBuilder`] and is read-only afterwards; lookups return
//! `Option` and the dispatch loop decides what a missing entry means.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::CheckKind;
use crate::ports::Probe;

/// Label used for kinds that have no registry entry.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Errors raised while assembling a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two probes claimed the same code.
    #[error("check kind {0} is already registered")]
    Duplicate(CheckKind),

    /// A built-in code is not a valid check kind.
    #[error(transparent)]
    InvalidKind(#[from] ConfigError),
}

/// Probe and label registered for one check kind.
#[derive(Clone)]
pub struct RegistryEntry {
    label: String,
    probe: Arc<dyn Probe>,
}

impl RegistryEntry {
    /// Human-readable name of the check kind.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The probe implementation.
    pub fn probe(&self) -> &Arc<dyn Probe> {
        &self.probe
    }
}

/// Read-only table of check kinds.
#[derive(Clone, Default)]
pub struct CheckRegistry {
    entries: BTreeMap<CheckKind, RegistryEntry>,
}

impl CheckRegistry {
    /// Start assembling a registry.
    pub fn builder() -> CheckRegistryBuilder {
        CheckRegistryBuilder::default()
    }

    /// Probe registered for `kind`.
    pub fn probe_for(&self, kind: &CheckKind) -> Option<&Arc<dyn Probe>> {
        self.entries.get(kind).map(RegistryEntry::probe)
    }

    /// Label registered for `kind`.
    pub fn label_for(&self, kind: &CheckKind) -> Option<&str> {
        self.entries.get(kind).map(RegistryEntry::label)
    }

    /// Label for `kind`, or [`UNKNOWN_LABEL`] when it is not registered.
    pub fn display_label(&self, kind: &CheckKind) -> &str {
        self.label_for(kind).unwrap_or(UNKNOWN_LABEL)
    }

    /// Whether `kind` has an entry.
    pub fn contains(&self, kind: &CheckKind) -> bool {
        self.entries.contains_key(kind)
    }

    /// Entries ordered by code.
    pub fn iter(&self) -> impl Iterator<Item = (&CheckKind, &RegistryEntry)> {
        self.entries.iter()
    }

    /// Number of registered kinds.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for CheckRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(kind, entry)| (kind.as_str(), entry.label())))
            .finish()
    }
}

/// Builder for [`CheckRegistry`].
#[derive(Default)]
pub struct CheckRegistryBuilder {
    entries: BTreeMap<CheckKind, RegistryEntry>,
}

impl CheckRegistryBuilder {
    /// Register `probe` under `kind`.
    ///
    /// Fails if the code is already taken.
    pub fn register(
        mut self,
        kind: CheckKind,
        label: impl Into<String>,
        probe: Arc<dyn Probe>,
    ) -> Result<Self, RegistryError> {
        if self.entries.contains_key(&kind) {
            return Err(RegistryError::Duplicate(kind));
        }
        self.entries.insert(
            kind,
            RegistryEntry {
                label: label.into(),
                probe,
            },
        );
        Ok(self)
    }

    /// Freeze the table.
    pub fn build(self) -> CheckRegistry {
        CheckRegistry {
            entries: self.entries,
        }
    }
}
