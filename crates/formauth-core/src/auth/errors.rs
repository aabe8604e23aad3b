use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Categories of login failures surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginErrorKind {
    /// Connection failure, timeout, or server-side (5xx) error
    Network,
    /// The identity provider refused the credentials or the token
    AuthRejected,
    /// The response body could not be decoded
    MalformedResponse,
    /// The session could not be written to or read from the store
    Storage,
}

impl fmt::Display for LoginErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginErrorKind::Network => write!(f, "network_error"),
            LoginErrorKind::AuthRejected => write!(f, "auth_rejected"),
            LoginErrorKind::MalformedResponse => write!(f, "malformed_response"),
            LoginErrorKind::Storage => write!(f, "storage_error"),
        }
    }
}

/// Structured login error with kind and details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginError {
    /// Error category
    pub kind: LoginErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// Optional additional details (e.g., raw error body)
    pub details: Option<String>,
}

impl LoginError {
    pub fn new(kind: LoginErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Creates an error from a failed HTTP exchange (no response received).
    pub fn transport(err: &reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "Request timed out".to_string()
        } else if err.is_connect() {
            "Could not connect to the identity provider".to_string()
        } else {
            "Request failed".to_string()
        };
        Self::new(LoginErrorKind::Network, message).with_details(err.to_string())
    }

    /// Creates an error from a non-success HTTP status.
    ///
    /// 4xx responses are rejections, everything else is a network error.
    /// The message is taken from an `error_description` / `error` body when
    /// one is present.
    pub fn http_status(status: u16, body: &str) -> Self {
        let kind = if (400..500).contains(&status) {
            LoginErrorKind::AuthRejected
        } else {
            LoginErrorKind::Network
        };

        let message = match describe_error_body(body) {
            Some(reason) => format!("HTTP {status}: {reason}"),
            None => format!("HTTP {status}"),
        };

        let err = Self::new(kind, message);
        if body.is_empty() {
            err
        } else {
            err.with_details(body)
        }
    }

    /// Creates a rejection from an `{error, error_description}` payload.
    pub fn rejected(error: &str, description: Option<&str>) -> Self {
        let message = match description {
            Some(desc) if !desc.is_empty() => format!("{error}: {desc}"),
            _ => error.to_string(),
        };
        Self::new(LoginErrorKind::AuthRejected, message)
    }

    pub fn malformed(what: &str, err: &serde_json::Error, body: &str) -> Self {
        Self::new(
            LoginErrorKind::MalformedResponse,
            format!("Could not decode {what}: {err}"),
        )
        .with_details(body)
    }

    pub fn storage(err: &anyhow::Error) -> Self {
        Self::new(
            LoginErrorKind::Storage,
            format!("Could not persist session: {err:#}"),
        )
    }

    /// Text shown to the user in the login view.
    pub fn user_message(&self) -> String {
        match self.kind {
            LoginErrorKind::Network => format!("Network error. {}", self.message),
            LoginErrorKind::AuthRejected => format!("Login rejected. {}", self.message),
            LoginErrorKind::MalformedResponse => {
                format!("Unexpected response. {}", self.message)
            }
            LoginErrorKind::Storage => self.message.clone(),
        }
    }
}

fn describe_error_body(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    let description = json
        .get("error_description")
        .or_else(|| json.get("message"))
        .and_then(Value::as_str);
    let error = json.get("error").and_then(Value::as_str);
    match (error, description) {
        (Some(e), Some(d)) => Some(format!("{e}: {d}")),
        (Some(e), None) => Some(e.to_string()),
        (None, Some(d)) => Some(d.to_string()),
        (None, None) => None,
    }
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for LoginError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_4xx_is_rejection_with_description() {
        let body = r#"{"error":"invalid_user_password","error_description":"Wrong email or password."}"#;
        let err = LoginError::http_status(401, body);
        assert_eq!(err.kind, LoginErrorKind::AuthRejected);
        assert_eq!(
            err.message,
            "HTTP 401: invalid_user_password: Wrong email or password."
        );
        assert_eq!(err.details.as_deref(), Some(body));
    }

    #[test]
    fn test_http_5xx_is_network_error() {
        let err = LoginError::http_status(503, "");
        assert_eq!(err.kind, LoginErrorKind::Network);
        assert_eq!(err.message, "HTTP 503");
        assert_eq!(err.details, None);
    }

    #[test]
    fn test_plain_text_body_kept_as_details() {
        let err = LoginError::http_status(401, "Unauthorized");
        assert_eq!(err.message, "HTTP 401");
        assert_eq!(err.details.as_deref(), Some("Unauthorized"));
    }

    #[test]
    fn test_rejected_formats_description() {
        assert_eq!(
            LoginError::rejected("access_denied", Some("blocked")).message,
            "access_denied: blocked"
        );
        assert_eq!(
            LoginError::rejected("access_denied", None).message,
            "access_denied"
        );
    }

    #[test]
    fn test_user_message_prefixes_kind() {
        let err = LoginError::new(LoginErrorKind::Network, "HTTP 502");
        assert_eq!(err.user_message(), "Network error. HTTP 502");
    }
}
