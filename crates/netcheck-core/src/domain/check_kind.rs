//! Check kind codes.
//!
//! A check kind is the short code at the start of every config line
//! (`ICMP`, `HTTP`, `PY`, ...). It is the registry key that selects a probe.

use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

/// Minimum number of characters in a check kind code.
pub const MIN_KIND_LEN: usize = 2;

/// Maximum number of characters in a check kind code.
pub const MAX_KIND_LEN: usize = 4;

/// A validated, upper-cased check kind code.
///
/// Construction goes through [`CheckKind::new`], so every value held by the
/// program is 2-4 ASCII alphanumerics in upper case and two spellings of the
/// same code (`http`, `HTTP`) compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CheckKind(String);

impl CheckKind {
    /// Validate and normalize a check kind code.
    pub fn new(code: &str) -> Result<Self, ConfigError> {
        let code = code.trim();
        let len = code.chars().count();
        if !(MIN_KIND_LEN..=MAX_KIND_LEN).contains(&len) {
            return Err(ConfigError::InvalidKind {
                code: code.to_string(),
                reason: format!("must be {MIN_KIND_LEN}-{MAX_KIND_LEN} characters long"),
            });
        }
        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::InvalidKind {
                code: code.to_string(),
                reason: "only ASCII letters and digits are allowed".to_string(),
            });
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// The normalized code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CheckKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for CheckKind {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_upper_cased() {
        let kind = CheckKind::new("htps").unwrap();
        assert_eq!(kind.as_str(), "HTPS");
        assert_eq!(kind, CheckKind::new("HTPS").unwrap());
    }

    #[test]
    fn test_kind_length_bounds() {
        assert!(CheckKind::new("p").is_err());
        assert!(CheckKind::new("py").is_ok());
        assert!(CheckKind::new("icmp").is_ok());
        assert!(CheckKind::new("icmpv").is_err());
    }

    #[test]
    fn test_kind_rejects_punctuation() {
        let err = CheckKind::new("h-tp").unwrap_err();
        assert!(err.to_string().contains("h-tp"));
    }

    #[test]
    fn test_kind_from_str() {
        let kind: CheckKind = "lua".parse().unwrap();
        assert_eq!(kind.to_string(), "LUA");
    }
}
