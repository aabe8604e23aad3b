//! Persisted login session.
//!
//! A session is the `jwt` token plus the JSON-serialized `profile`, kept in
//! a [`KeyValueStore`]. Both keys are present or neither is.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::auth::Profile;
use crate::logging::mask_token;
use crate::store::KeyValueStore;

/// Store key of the identity token.
pub const TOKEN_KEY: &str = "jwt";
/// Store key of the serialized profile.
pub const PROFILE_KEY: &str = "profile";

/// A logged-in user.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub profile: Profile,
}

/// Cloneable handle over the durable store holding the session.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Restores the persisted session.
    ///
    /// A token without a readable profile is inconsistent; both keys are
    /// cleared and no session is returned.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn load(&self) -> Result<Option<Session>> {
        let Some(token) = self.store.get(TOKEN_KEY).context("read stored token")? else {
            return Ok(None);
        };

        let profile = self
            .store
            .get(PROFILE_KEY)
            .context("read stored profile")?
            .and_then(|raw| match serde_json::from_str::<Profile>(&raw) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::warn!("Stored profile is unreadable: {e}");
                    None
                }
            });

        if let Some(profile) = profile {
            tracing::debug!(token = %mask_token(&token), "Restored session");
            Ok(Some(Session { token, profile }))
        } else {
            tracing::warn!("Stored token has no profile; clearing session");
            self.clear()?;
            Ok(None)
        }
    }

    /// Persists the token (exchange step 2).
    ///
    /// # Errors
    /// Returns an error if the store cannot be written.
    pub fn save_token(&self, token: &str) -> Result<()> {
        self.store.set(TOKEN_KEY, token).context("store token")
    }

    /// Persists the profile (exchange step 4).
    ///
    /// # Errors
    /// Returns an error if serialization or the store write fails.
    pub fn save_profile(&self, profile: &Profile) -> Result<()> {
        let raw = serde_json::to_string(profile).context("serialize profile")?;
        self.store.set(PROFILE_KEY, &raw).context("store profile")
    }

    /// Removes both session keys.
    ///
    /// # Errors
    /// Returns an error if the store cannot be written.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY).context("remove stored token")?;
        self.store
            .remove(PROFILE_KEY)
            .context("remove stored profile")
    }

    /// Returns true if a token is stored (the profile is not checked).
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn has_token(&self) -> Result<bool> {
        Ok(self.store.get(TOKEN_KEY)?.is_some())
    }
}
