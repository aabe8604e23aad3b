//! UI effect types.
//!
//! Effects are returned by the reducer and executed by the runtime. They
//! carry the I/O (network, session store) so the reducer never performs it.

use formauth_core::auth::Credentials;

#[derive(Debug, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Run the credential exchange in the background.
    SpawnLogin { credentials: Credentials },

    /// Clear the persisted session.
    Logout,
}
