//! Login key handling.
//!
//! The reducer never talks to the provider: a valid submit hands the
//! credentials to the runtime as an effect.

use crossterm::event::{KeyCode, KeyEvent};
use formauth_core::components::LoginPhase;
use formauth_core::form::FormError;

use super::{CONTROLS, LoginControl, LoginView};
use crate::common::{Nav, edit_text, paste_text};
use crate::effects::UiEffect;

pub fn handle_key(view: &mut LoginView, key: KeyEvent) -> Vec<UiEffect> {
    match view.component.phase() {
        LoginPhase::Authenticated(_) => match key.code {
            KeyCode::Enter | KeyCode::Char('l') => vec![UiEffect::Logout],
            _ => vec![],
        },
        // Input is frozen until the exchange reports back.
        LoginPhase::Exchanging => vec![],
        LoginPhase::Unauthenticated => handle_form_key(view, key),
    }
}

pub fn handle_paste(view: &mut LoginView, text: &str) {
    if !matches!(view.component.phase(), LoginPhase::Unauthenticated) {
        return;
    }
    if let LoginControl::Text(name) = view.focused() {
        paste_text(view.component.form_mut(), name, text);
    }
}

fn handle_form_key(view: &mut LoginView, key: KeyEvent) -> Vec<UiEffect> {
    if let Some(nav) = Nav::from_key(&key) {
        if let LoginControl::Text(name) = view.focused() {
            let _ = view.component.form_mut().touch(name);
        }
        view.focus = nav.apply(view.focus, CONTROLS.len());
        return vec![];
    }

    match (key.code, view.focused()) {
        (KeyCode::Enter, _) => submit(view),
        (_, LoginControl::Text(name)) => {
            edit_text(view.component.form_mut(), name, &key);
            vec![]
        }
        (_, LoginControl::Submit) => vec![],
    }
}

fn submit(view: &mut LoginView) -> Vec<UiEffect> {
    match view.component.begin_submit() {
        Ok(credentials) => {
            tracing::info!(email = %credentials.email, "Login submitted");
            vec![UiEffect::SpawnLogin { credentials }]
        }
        Err(FormError::SubmitDisabled(fields)) => {
            tracing::debug!(?fields, "Login submit blocked");
            vec![]
        }
        Err(err) => {
            tracing::debug!("Login submit ignored: {err}");
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::KeyModifiers;
    use formauth_core::auth::{Credentials, LoginError, LoginErrorKind, Profile};
    use formauth_core::components::LoginComponent;
    use formauth_core::components::login::{EMAIL, PASSWORD, PASSWORD_REQUIRED_MESSAGE};
    use formauth_core::session::{Session, SessionStore};
    use formauth_core::store::MemoryStore;
    use serde_json::json;

    use super::*;

    fn view() -> LoginView {
        let sessions = SessionStore::new(Arc::new(MemoryStore::new()));
        LoginView::new(LoginComponent::restore(sessions).unwrap())
    }

    fn press(view: &mut LoginView, code: KeyCode) -> Vec<UiEffect> {
        handle_key(view, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(view: &mut LoginView, text: &str) {
        for c in text.chars() {
            press(view, KeyCode::Char(c));
        }
    }

    fn session() -> Session {
        Session {
            token: "abc".to_string(),
            profile: Profile::new(json!({"email": "a@b.com"}).as_object().cloned().unwrap()),
        }
    }

    #[test]
    fn test_enter_with_empty_password_spawns_nothing() {
        let mut v = view();
        type_str(&mut v, "a@b.com");
        assert!(press(&mut v, KeyCode::Enter).is_empty());
        assert_eq!(
            v.component.field_message(PASSWORD),
            Some(PASSWORD_REQUIRED_MESSAGE)
        );
    }

    #[test]
    fn test_valid_submit_spawns_login_once() {
        let mut v = view();
        type_str(&mut v, "a@b.com");
        press(&mut v, KeyCode::Tab);
        type_str(&mut v, "secret");

        assert_eq!(
            press(&mut v, KeyCode::Enter),
            vec![UiEffect::SpawnLogin {
                credentials: Credentials::new("a@b.com", "secret")
            }]
        );
        assert!(v.component.is_exchanging());
        assert!(press(&mut v, KeyCode::Enter).is_empty());
        press(&mut v, KeyCode::Char('x'));
        assert_eq!(
            v.component.form().field(PASSWORD).unwrap().value().as_text(),
            Some("secret")
        );
    }

    #[test]
    fn test_authenticated_view_logs_out_on_l_or_enter() {
        let mut v = view();
        type_str(&mut v, "a@b.com");
        press(&mut v, KeyCode::Tab);
        type_str(&mut v, "secret");
        press(&mut v, KeyCode::Enter);
        v.component.finish_submit(Ok(session()));

        assert!(press(&mut v, KeyCode::Char('x')).is_empty());
        assert_eq!(press(&mut v, KeyCode::Char('l')), vec![UiEffect::Logout]);
        assert_eq!(press(&mut v, KeyCode::Enter), vec![UiEffect::Logout]);
    }

    #[test]
    fn test_failed_exchange_reenables_submit() {
        let mut v = view();
        type_str(&mut v, "a@b.com");
        press(&mut v, KeyCode::Tab);
        type_str(&mut v, "secret");
        press(&mut v, KeyCode::Enter);
        v.component
            .finish_submit(Err(LoginError::new(LoginErrorKind::Network, "down")));

        assert_eq!(press(&mut v, KeyCode::Enter).len(), 1);
    }

    #[test]
    fn test_blur_touches_email() {
        let mut v = view();
        press(&mut v, KeyCode::Down);
        assert!(v.component.form().field(EMAIL).unwrap().is_touched());
    }
}
