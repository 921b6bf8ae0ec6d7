//! Tracing subscriber setup

use std::fs;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

/// Where log events go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// CLI commands
    Stderr,
    /// The TUI owns the terminal, so it logs to `dir/bikedash.log`
    File(PathBuf),
}

fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("bikedash=debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_tracing(verbose: bool, target: LogTarget) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_target(false);

    let _ = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(dir) => {
            if fs::create_dir_all(&dir).is_err() {
                return;
            }
            let appender = tracing_appender::rolling::never(dir, "bikedash.log");
            builder.with_ansi(false).with_writer(appender).try_init()
        }
    };
}
