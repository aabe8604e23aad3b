//! Tracing setup.
//!
//! CLI commands log to stderr. The TUI owns the terminal, so it logs to a
//! daily-rolling file instead.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Env var holding a tracing filter directive (wins over the config level).
pub const LOG_ENV: &str = "FORMAUTH_LOG";

/// Target of the validated-form submission trace.
pub const SUBMIT_TARGET: &str = "formauth::submit";

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs a stderr subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_stderr(default_level: &str) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

/// Installs a non-blocking file subscriber writing `formauth.log.<date>`
/// under `dir`. Keep the returned guard alive until exit to flush.
///
/// # Errors
/// Returns an error if the log directory cannot be created.
pub fn init_file(dir: &Path, default_level: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(dir, "formauth.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let _ = tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
        )
        .try_init();

    Ok(guard)
}

/// Returns a masked version of a token for display (first 12 chars + ...).
pub fn mask_token(token: &str) -> String {
    if token.chars().count() <= 16 {
        return "***".to_string();
    }
    let head: String = token.chars().take(12).collect();
    format!("{head}...")
}
