//! Config line scanning.
//!
//! The config format is one check per line:
//!
//! ```text
//! # comment
//! icmp 127.0.0.1
//! http example.test
//! py   tcp_port_check.py db.internal:5432
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::ConfigError;
use crate::domain::{CheckKind, CheckTarget};

/// Comment prefix; lines starting with it (after trimming) are skipped.
pub const COMMENT_PREFIX: &str = "#";

// 2-4 char check type + whitespace + the rest of the line as target
static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9]{2,4})\s+(.+)$").expect("config line pattern is a valid regex")
});

/// Result of scanning a config source.
///
/// Malformed lines do not stop the scan; they are collected in `rejected`
/// so the caller can log them and carry on with the valid targets.
#[derive(Debug, Default)]
pub struct ParsedConfig {
    /// Valid targets, in declaration order.
    pub targets: Vec<CheckTarget>,
    /// One error per malformed line, in declaration order.
    pub rejected: Vec<ConfigError>,
}

/// Parse a single config line.
///
/// Returns `Ok(None)` for blank and comment lines. `line_no` is 1-based and
/// only used for diagnostics.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<CheckTarget>, ConfigError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
        return Ok(None);
    }

    let captures = LINE_PATTERN
        .captures(line)
        .ok_or_else(|| ConfigError::InvalidLine {
            line: line_no,
            content: line.to_string(),
        })?;

    let kind = CheckKind::new(&captures[1])?;
    let target = CheckTarget::new(kind, &captures[2]).with_line(line_no);
    Ok(Some(target))
}

/// Scan every line of `reader`.
///
/// Lines are split on raw `\n` bytes and decoded lossily, so invalid UTF-8
/// only affects the line it appears on. Only an I/O failure aborts the scan.
pub fn parse_reader<R: BufRead>(mut reader: R) -> std::io::Result<ParsedConfig> {
    let mut parsed = ParsedConfig::default();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let line = String::from_utf8_lossy(&buf);
        match parse_line(&line, line_no) {
            Ok(Some(target)) => {
                debug!(line = line_no, check_type = %target.kind, host = %target.target, "parsed config line");
                parsed.targets.push(target);
            }
            Ok(None) => {}
            Err(err) => parsed.rejected.push(err),
        }
    }

    Ok(parsed)
}

/// Open and scan the config file at `path`.
///
/// Streams the file line by line; nothing but the parsed targets is kept.
pub fn load_targets(path: &Path) -> Result<ParsedConfig, ConfigError> {
    let file = File::open(path).map_err(|source| ConfigError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    parse_reader(BufReader::new(file)).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}
