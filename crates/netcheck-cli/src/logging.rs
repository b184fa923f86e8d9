//! Tracing subscriber setup.
//!
//! Console output goes to stderr. With `--log <path>` a second, ANSI-free
//! layer appends the same events to a transcript file.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::CliError;

/// Filter for the global subscriber.
///
/// `--verbose` forces `debug`; otherwise `RUST_LOG` applies, falling back to
/// `info`.
pub fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Open `path` for appending, creating it if needed.
pub fn open_transcript(path: &Path) -> Result<File, CliError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CliError::Io(format!("failed to open transcript {}: {e}", path.display())))
}

/// Install the global subscriber.
pub fn init(verbose: bool, transcript: Option<&Path>) -> Result<(), CliError> {
    let transcript_layer = match transcript {
        Some(path) => Some(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(open_transcript(path)?)),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(transcript_layer)
        .try_init()
        .map_err(|e| CliError::Core(format!("failed to initialize logging: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_verbose_forces_debug() {
        assert_eq!(env_filter(true).to_string(), "debug");
    }

    #[test]
    fn test_transcript_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("netcheck.log");
        std::fs::write(&path, "earlier run\n").unwrap();

        let mut file = open_transcript(&path).unwrap();
        writeln!(file, "this run").unwrap();
        drop(file);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "earlier run\nthis run\n");
    }

    #[test]
    fn test_unopenable_transcript_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = open_transcript(dir.path()).unwrap_err();
        assert_eq!(err.exit_code(), 74);
    }
}
