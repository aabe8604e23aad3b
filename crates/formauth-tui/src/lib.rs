//! Full-screen terminal UI for the validated form and the login flow.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;
pub mod widgets;

use std::io::{IsTerminal, stderr};
use std::sync::Arc;

use anyhow::{Context, Result};
use formauth_core::auth::AuthClient;
use formauth_core::components::LoginComponent;
use formauth_core::config::Config;
use formauth_core::session::SessionStore;
use formauth_core::store::FileStore;
pub use runtime::TuiRuntime;

use crate::state::AppState;

/// Runs the interactive UI until the user quits.
///
/// Must be called inside a multi-threaded tokio runtime; the credential
/// exchange runs on a spawned task.
///
/// # Errors
/// Returns an error when stderr is not a terminal, the session store
/// cannot be read, or the terminal fails.
pub fn run_interactive(config: &Config) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The interactive UI requires a terminal.\n\
             Use `formauth form ...` or `formauth login ...` for non-interactive use."
        );
    }

    let store = Arc::new(FileStore::new(config.storage_path()));
    let sessions = SessionStore::new(store);
    let login = LoginComponent::restore(sessions).context("Failed to restore session")?;
    let client = AuthClient::new(config.auth.clone())?;

    tracing::info!("Starting interactive UI");
    let mut runtime = TuiRuntime::new(AppState::new(login), client)?;
    runtime.run()
}
