//! Main CLI parser and top-level argument handling.
//!
//! Every run option can also come from the environment (or a `.env` file).

use std::path::PathBuf;

use clap::Parser;
use netcheck_core::{
    DEFAULT_CONFIG_FILE, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_PING_WAIT_MS,
    DEFAULT_SCRIPT_TIMEOUT_SECS, DEFAULT_SCRIPTS_DIR,
};

use crate::bootstrap::CliConfig;
use crate::commands::Commands;

/// Check host health from a list of typed checks.
///
/// Each line of the config file is `<checktype> <target>`, e.g.
/// `ICMP 10.0.0.1`, `HTTP example.com` or `PY port_check.py db01 5432`.
/// Check types: ICMP, HTTP, HTPS, COMB, LUA, PY, PS.
#[derive(Parser, Debug)]
#[command(name = "netcheck")]
#[command(version)]
pub struct Cli {
    /// Path to the config file
    #[arg(short = 'f', long = "config", env = "NETCHECK_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Batch mode: exit without the "Press any key" prompt
    #[arg(short = 'b', long = "batch", env = "NETCHECK_BATCH")]
    pub batch: bool,

    /// Also append the log to this transcript file
    #[arg(short = 'l', long = "log", env = "NETCHECK_LOG", global = true)]
    pub log: Option<PathBuf>,

    /// Directory script checks are looked up in
    #[arg(long = "scripts-dir", env = "NETCHECK_SCRIPTS_DIR", default_value = DEFAULT_SCRIPTS_DIR)]
    pub scripts_dir: PathBuf,

    /// Timeout of one HTTP/HTTPS request, in seconds
    #[arg(long = "http-timeout", env = "NETCHECK_HTTP_TIMEOUT", value_name = "SECS", default_value_t = DEFAULT_HTTP_TIMEOUT_SECS)]
    pub http_timeout: u64,

    /// How long ping waits for its reply, in milliseconds
    #[arg(long = "ping-wait-ms", env = "NETCHECK_PING_WAIT_MS", value_name = "MS", default_value_t = DEFAULT_PING_WAIT_MS)]
    pub ping_wait_ms: u64,

    /// Deadline for one script check, in seconds (0 = none)
    #[arg(long = "script-timeout", env = "NETCHECK_SCRIPT_TIMEOUT", value_name = "SECS", default_value_t = DEFAULT_SCRIPT_TIMEOUT_SECS)]
    pub script_timeout: u64,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Bootstrap configuration described by these arguments.
    pub fn to_config(&self) -> CliConfig {
        CliConfig {
            config_path: self.config.clone(),
            batch: self.batch,
            scripts_dir: self.scripts_dir.clone(),
            http_timeout_secs: self.http_timeout,
            ping_wait_ms: self.ping_wait_ms,
            script_timeout_secs: self.script_timeout,
        }
    }
}
