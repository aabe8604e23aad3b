//! Events fed to the reducer.

use crossterm::event::Event;
use formauth_core::auth::LoginError;
use formauth_core::session::Session;

#[derive(Debug)]
pub enum UiEvent {
    /// Raw terminal input (keys, paste, resize).
    Terminal(Event),

    /// Render cadence.
    Tick,

    /// Outcome of a spawned credential exchange.
    LoginFinished(Result<Session, LoginError>),
}
