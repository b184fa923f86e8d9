//! Check list config source.
//!
//! Turns `netcheck.txt`-style text into ordered [`CheckTarget`](crate::CheckTarget)s.

mod error;
mod parse;

pub use error::ConfigError;
pub use parse::{COMMENT_PREFIX, ParsedConfig, load_targets, parse_line, parse_reader};
