use std::{path::Path, sync::LazyLock};

use anyhow::{anyhow, Result};
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::{Builder, Rotation};
use tracing_subscriber::{
    fmt::{format::FmtSpan, writer::MakeWriterExt},
    EnvFilter,
};

pub const CLI_PREFIX: &str = "cli";

const MAX_LOG_FILES: usize = 5;
const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber. Logs always go into daily rotated files inside `log_dir`,
/// `show_std` additionally mirrors them to stderr so they don't mix with the menu on stdout.
pub fn enable_logging(
    prefix: &str,
    log_dir: &Path,
    log_level: Option<LevelFilter>,
    show_std: bool,
) -> Result<()> {
    let files = Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(MAX_LOG_FILES)
        .filename_prefix(prefix)
        .build(log_dir)?;
    let stderr = std::io::stderr.with_filter(move |_| show_std);

    tracing_subscriber::fmt()
        .with_env_filter(crate_filter(log_level, std::env::var("RUST_LOG").ok()))
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(stderr.and(files))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install logger {e}"))
}

/// Only events of this crate are let through. An explicit level wins over `RUST_LOG`.
fn crate_filter(log_level: Option<LevelFilter>, env_level: Option<String>) -> EnvFilter {
    let level = log_level
        .map(|v| v.to_string())
        .or(env_level)
        .unwrap_or_else(|| DEFAULT_LEVEL.into());
    EnvFilter::new(format!("{}={level}", env!("CARGO_PKG_NAME").replace('-', "_")))
}

/// Sends everything the crate logs to the test output. Dereference it at the start of a test.
pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    // Ignored when a global subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(crate_filter(Some(LevelFilter::TRACE), None))
        .with_test_writer()
        .compact()
        .try_init();
});
