//! Wire schemas for the token and profile endpoints.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Email and password collected by the login form.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Resource-owner password grant request.
#[derive(Debug, Clone, Serialize)]
pub struct TokenRequest<'a> {
    pub client_id: &'a str,
    pub username: &'a str,
    pub password: &'a str,
    pub connection: &'a str,
    pub grant_type: &'a str,
    pub scope: &'a str,
}

impl TokenRequest<'_> {
    pub const GRANT_TYPE: &'static str = "password";
}

/// Token endpoint response.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TokenResponse {
    Granted {
        #[serde(alias = "token")]
        id_token: String,
        #[serde(default)]
        access_token: Option<String>,
        #[serde(default)]
        token_type: Option<String>,
    },
    Rejected {
        error: String,
        #[serde(default)]
        error_description: Option<String>,
    },
    /// Any other JSON payload (no token, no error).
    Unrecognized(Value),
}

/// Profile lookup request.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileRequest<'a> {
    pub id_token: &'a str,
}

/// Profile endpoint response.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProfileResponse {
    Rejected {
        error: String,
        #[serde(default)]
        error_description: Option<String>,
    },
    Profile(Profile),
}

/// User profile as returned by the identity provider.
///
/// The record is opaque; only a few well-known keys have accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile(Map<String, Value>);

impl Profile {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn email(&self) -> Option<&str> {
        self.str_field("email")
    }

    pub fn picture(&self) -> Option<&str> {
        self.str_field("picture")
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    /// Email, falling back to name, then a generic label.
    pub fn display_name(&self) -> &str {
        self.email().or_else(|| self.name()).unwrap_or("user")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}
