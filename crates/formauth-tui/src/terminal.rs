//! Terminal lifecycle management.
//!
//! Raw mode and the alternate screen are restored on normal exit and on
//! panic.

use std::io::{self, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Enters raw mode and the alternate screen and builds the terminal.
///
/// Call `install_panic_hook()` first so a panic still restores the screen.
///
/// # Errors
/// Returns an error if the terminal cannot be switched into TUI mode.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("Failed to create terminal")
}

/// Restores terminal state. Safe to call more than once.
///
/// # Errors
/// Returns an error if the terminal cannot leave the alternate screen.
pub fn restore_terminal() -> Result<()> {
    // Bracketed paste must go before raw mode does.
    let _ = execute!(io::stdout(), DisableBracketedPaste);
    execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}
