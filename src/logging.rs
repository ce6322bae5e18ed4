use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "TABATA_LOG";
pub const LOG_FILE: &str = "tabata.log";

/// Filter from `TABATA_LOG`, then `RUST_LOG`, then `info`
pub fn env_filter(debug: bool) -> EnvFilter {
    if debug {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Send tracing output to a file in `dir`; stdout belongs to the TUI.
///
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init(dir: &Path, debug: bool) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(debug))
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
