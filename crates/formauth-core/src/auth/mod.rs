//! Credential exchange against the identity provider.
//!
//! The exchange is two sequential requests: credentials for a token, then
//! the token for a profile. The token is persisted between the two and
//! rolled back if the profile lookup fails, so the store never holds half
//! a session once [`exchange`] returns.

mod client;
mod errors;
mod types;

pub use client::AuthClient;
pub use errors::{LoginError, LoginErrorKind};
pub use types::{
    Credentials, Profile, ProfileRequest, ProfileResponse, TokenRequest, TokenResponse,
};

use crate::session::{Session, SessionStore};

/// Runs the two-step exchange and persists the resulting session.
///
/// # Errors
/// Returns the first failing step's error. On failure the store holds no
/// session.
pub async fn exchange(
    client: &AuthClient,
    sessions: &SessionStore,
    credentials: &Credentials,
) -> Result<Session, LoginError> {
    let token = client.request_token(credentials).await?;
    sessions
        .save_token(&token)
        .map_err(|e| LoginError::storage(&e))?;

    let profile = match client.fetch_profile(&token).await {
        Ok(profile) => profile,
        Err(err) => {
            if let Err(e) = sessions.clear() {
                tracing::error!("Failed to roll back stored token: {e:#}");
            }
            return Err(err);
        }
    };

    if let Err(err) = sessions.save_profile(&profile) {
        if let Err(e) = sessions.clear() {
            tracing::error!("Failed to roll back stored token: {e:#}");
        }
        return Err(LoginError::storage(&err));
    }

    tracing::info!(user = %profile.display_name(), "Logged in");
    Ok(Session { token, profile })
}
