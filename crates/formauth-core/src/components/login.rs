//! The login component.
//!
//! Shows the login form while unauthenticated and the profile afterwards.
//! Submitting runs the credential exchange; the `Exchanging` phase blocks a
//! second submit until the first one finishes.

use anyhow::{Context, Result};

use crate::auth::{AuthClient, Credentials, LoginError, Profile, exchange};
use crate::form::{Field, Form, FormError, Rule};
use crate::session::{Session, SessionStore};

pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";

pub const EMAIL_REQUIRED_MESSAGE: &str = "You must add an email.";
pub const PASSWORD_REQUIRED_MESSAGE: &str = "You must add a password.";

/// Where the component is in the login lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginPhase {
    Unauthenticated,
    Exchanging,
    Authenticated(Session),
}

/// Login form plus session state.
pub struct LoginComponent {
    form: Form,
    phase: LoginPhase,
    sessions: SessionStore,
    last_error: Option<LoginError>,
}

fn login_form() -> Form {
    Form::new(vec![
        Field::text(EMAIL, "Email")
            .placeholder("John@doe.com")
            .rule(Rule::Required),
        Field::text(PASSWORD, "Password")
            .placeholder("Password")
            .rule(Rule::Required),
    ])
}

impl LoginComponent {
    /// Builds the component, restoring a persisted session if present.
    ///
    /// Never touches the network.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn restore(sessions: SessionStore) -> Result<Self> {
        let phase = match sessions.load().context("restore session")? {
            Some(session) => {
                tracing::info!(user = %session.profile.display_name(), "Session restored");
                LoginPhase::Authenticated(session)
            }
            None => LoginPhase::Unauthenticated,
        };

        Ok(Self {
            form: login_form(),
            phase,
            sessions,
            last_error: None,
        })
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    pub fn phase(&self) -> &LoginPhase {
        &self.phase
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.phase, LoginPhase::Authenticated(_))
    }

    pub fn is_exchanging(&self) -> bool {
        matches!(self.phase, LoginPhase::Exchanging)
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.phase {
            LoginPhase::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.session().map(|s| &s.profile)
    }

    /// Error of the most recent failed exchange, cleared on the next submit.
    pub fn last_error(&self) -> Option<&LoginError> {
        self.last_error.as_ref()
    }

    /// Submit is enabled when both fields are filled and nothing is running.
    pub fn can_submit(&self) -> bool {
        matches!(self.phase, LoginPhase::Unauthenticated) && self.form.is_valid()
    }

    /// Error line under a field, only once the field was touched.
    pub fn field_message(&self, name: &str) -> Option<&'static str> {
        let field = self.form.field(name)?;
        if !field.show_error() {
            return None;
        }
        match name {
            EMAIL => Some(EMAIL_REQUIRED_MESSAGE),
            PASSWORD => Some(PASSWORD_REQUIRED_MESSAGE),
            _ => None,
        }
    }

    /// "Welcome, ..." line of the profile view.
    pub fn welcome_line(&self) -> Option<String> {
        self.profile().map(|p| format!("Welcome, {}", p.display_name()))
    }

    /// Moves to `Exchanging` and hands out the credentials to send.
    ///
    /// # Errors
    /// `SubmitInFlight` while an exchange runs, `SubmitDisabled` when a field
    /// is empty or a session already exists.
    pub fn begin_submit(&mut self) -> Result<Credentials, FormError> {
        match self.phase {
            LoginPhase::Exchanging => return Err(FormError::SubmitInFlight),
            LoginPhase::Authenticated(_) => return Err(FormError::SubmitDisabled(Vec::new())),
            LoginPhase::Unauthenticated => {}
        }
        if !self.form.is_valid() {
            self.form.touch_all();
            return Err(FormError::SubmitDisabled(self.form.invalid_fields()));
        }

        let text = |name: &str| {
            self.form
                .field(name)
                .and_then(|f| f.value().as_text())
                .unwrap_or_default()
                .to_string()
        };
        let credentials = Credentials::new(text(EMAIL), text(PASSWORD));

        self.last_error = None;
        self.phase = LoginPhase::Exchanging;
        Ok(credentials)
    }

    /// Applies the exchange outcome.
    ///
    /// Success authenticates and resets the form; failure returns to
    /// `Unauthenticated` keeping the entered values and recording the error.
    pub fn finish_submit(&mut self, result: Result<Session, LoginError>) {
        match result {
            Ok(session) => {
                self.form.reset();
                self.last_error = None;
                self.phase = LoginPhase::Authenticated(session);
            }
            Err(err) => {
                tracing::warn!(kind = %err.kind, "Login failed: {err}");
                self.last_error = Some(err);
                self.phase = LoginPhase::Unauthenticated;
            }
        }
    }

    /// Runs the whole submit: gate, exchange, state transition.
    ///
    /// # Errors
    /// Returns the form error when submit is not allowed. Exchange failures
    /// are not errors here; they are recorded in [`Self::last_error`].
    pub async fn submit(&mut self, client: &AuthClient) -> Result<(), FormError> {
        let credentials = self.begin_submit()?;
        let result = exchange(client, &self.sessions, &credentials).await;
        self.finish_submit(result);
        Ok(())
    }

    /// Clears the persisted session and returns to the login form.
    ///
    /// # Errors
    /// Returns an error if the store cannot be written. The phase is left
    /// untouched and the failure is recorded in [`Self::last_error`].
    pub fn logout(&mut self) -> Result<()> {
        if let Err(err) = self.sessions.clear() {
            self.last_error = Some(LoginError::storage(&err));
            return Err(err.context("clear session"));
        }
        self.phase = LoginPhase::Unauthenticated;
        self.last_error = None;
        tracing::info!("Logged out");
        Ok(())
    }
}
