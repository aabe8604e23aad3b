//! HTTP client for the token and profile endpoints.

use anyhow::{Context, Result};

use super::errors::LoginError;
use super::types::{
    Credentials, Profile, ProfileRequest, ProfileResponse, TokenRequest, TokenResponse,
};
use crate::config::AuthConfig;
use crate::logging::mask_token;

/// Client for the identity provider.
#[derive(Debug, Clone)]
pub struct AuthClient {
    config: AuthConfig,
    http: reqwest::Client,
}

impl AuthClient {
    /// Builds a client applying the configured request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: AuthConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("build HTTP client")?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Exchanges credentials for an identity token.
    ///
    /// # Errors
    /// Fails with `Network` on transport/5xx errors, `AuthRejected` when the
    /// provider refuses the credentials or returns no token, and
    /// `MalformedResponse` when the body is not JSON.
    pub async fn request_token(&self, credentials: &Credentials) -> Result<String, LoginError> {
        let request = TokenRequest {
            client_id: &self.config.client_id,
            username: &credentials.email,
            password: &credentials.password,
            connection: &self.config.connection,
            grant_type: TokenRequest::GRANT_TYPE,
            scope: &self.config.scope,
        };

        tracing::info!(url = %self.config.token_url, email = %credentials.email, "Requesting token");
        let body = self.post_json(&self.config.token_url, &request).await?;

        let response: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| LoginError::malformed("token response", &e, &body))?;

        match response {
            TokenResponse::Granted { id_token, .. } if !id_token.is_empty() => {
                tracing::debug!(token = %mask_token(&id_token), "Token granted");
                Ok(id_token)
            }
            TokenResponse::Rejected {
                error,
                error_description,
            } => Err(LoginError::rejected(&error, error_description.as_deref())),
            TokenResponse::Granted { .. } | TokenResponse::Unrecognized(_) => {
                Err(LoginError::rejected("no_token", Some("response carried no token"))
                    .with_details(body))
            }
        }
    }

    /// Looks up the profile belonging to an identity token.
    ///
    /// # Errors
    /// Same categories as [`AuthClient::request_token`].
    pub async fn fetch_profile(&self, token: &str) -> Result<Profile, LoginError> {
        tracing::info!(url = %self.config.profile_url, "Fetching profile");
        let body = self
            .post_json(&self.config.profile_url, &ProfileRequest { id_token: token })
            .await?;

        let response: ProfileResponse = serde_json::from_str(&body)
            .map_err(|e| LoginError::malformed("profile response", &e, &body))?;

        match response {
            ProfileResponse::Profile(profile) => Ok(profile),
            ProfileResponse::Rejected {
                error,
                error_description,
            } => Err(LoginError::rejected(&error, error_description.as_deref())),
        }
    }

    async fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        payload: &T,
    ) -> Result<String, LoginError> {
        let response = self
            .http
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| LoginError::transport(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LoginError::transport(&e))?;

        if !status.is_success() {
            tracing::warn!(%status, "Identity provider returned an error");
            return Err(LoginError::http_status(status.as_u16(), &body));
        }

        Ok(body)
    }
}
