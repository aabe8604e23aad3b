//! Interactive UI command.

use anyhow::Result;
use formauth_core::config::Config;
use formauth_core::logging;

#[cfg(feature = "tui")]
pub fn run(config: &Config) -> Result<()> {
    // The UI owns the terminal, so tracing goes to a file.
    let _guard = logging::init_file(&config.logs_dir(), &config.logging.level)?;
    formauth_tui::run_interactive(config)
}

#[cfg(not(feature = "tui"))]
pub fn run(config: &Config) -> Result<()> {
    logging::init_stderr(&config.logging.level);
    anyhow::bail!(
        "This build has no interactive UI.\n\
         Use `formauth form ...` or `formauth login ...` instead."
    )
}
