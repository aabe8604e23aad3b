//! Reducer: applies an event to the state and returns the effects to run.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::{login, validated_form};
use crate::state::{AppState, Screen};

pub fn update(state: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Terminal(Event::Key(key)) if key.kind != KeyEventKind::Release => {
            handle_key(state, key)
        }
        UiEvent::Terminal(Event::Paste(text)) => {
            match state.screen {
                Screen::Form => validated_form::handle_paste(&mut state.form, &text),
                Screen::Login => login::handle_paste(&mut state.login, &text),
            }
            vec![]
        }
        UiEvent::Terminal(_) | UiEvent::Tick => vec![],
        UiEvent::LoginFinished(result) => {
            let ok = result.is_ok();
            state.login.component.finish_submit(result);
            if ok {
                state.login.focus = 0;
                state.status = None;
            }
            vec![]
        }
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => return vec![UiEffect::Quit],
        KeyCode::Char('c') if ctrl => return vec![UiEffect::Quit],
        KeyCode::F(1) => {
            state.screen = Screen::Form;
            return vec![];
        }
        KeyCode::F(2) => {
            state.screen = Screen::Login;
            return vec![];
        }
        _ => {}
    }

    match state.screen {
        Screen::Form => {
            validated_form::handle_key(&mut state.form, key);
            vec![]
        }
        Screen::Login => login::handle_key(&mut state.login, key),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use formauth_core::auth::{LoginError, LoginErrorKind};
    use formauth_core::components::LoginComponent;
    use formauth_core::session::SessionStore;
    use formauth_core::store::MemoryStore;

    use super::*;

    fn state() -> AppState {
        let sessions = SessionStore::new(Arc::new(MemoryStore::new()));
        AppState::new(LoginComponent::restore(sessions).unwrap())
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, modifiers)))
    }

    #[test]
    fn test_quit_keys() {
        let mut s = state();
        assert_eq!(
            update(&mut s, key(KeyCode::Esc, KeyModifiers::NONE)),
            vec![UiEffect::Quit]
        );
        assert_eq!(
            update(&mut s, key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            vec![UiEffect::Quit]
        );
    }

    #[test]
    fn test_function_keys_switch_screens() {
        let mut s = state();
        assert_eq!(s.screen, Screen::Form);
        update(&mut s, key(KeyCode::F(2), KeyModifiers::NONE));
        assert_eq!(s.screen, Screen::Login);
        update(&mut s, key(KeyCode::F(1), KeyModifiers::NONE));
        assert_eq!(s.screen, Screen::Form);
    }

    #[test]
    fn test_typing_goes_to_active_screen() {
        let mut s = state();
        update(&mut s, key(KeyCode::F(2), KeyModifiers::NONE));
        update(&mut s, key(KeyCode::Char('a'), KeyModifiers::NONE));
        update(&mut s, UiEvent::Terminal(Event::Paste("@b.com".into())));

        let email = s.login.component.form().field("email").unwrap();
        assert_eq!(email.value().as_text(), Some("a@b.com"));
        assert!(s.form.component.form().fields().iter().all(|f| !f.is_touched()));
    }

    #[test]
    fn test_login_finished_failure_is_recorded() {
        let mut s = state();
        update(
            &mut s,
            UiEvent::LoginFinished(Err(LoginError::new(LoginErrorKind::Network, "down"))),
        );
        assert_eq!(
            s.login.component.last_error().map(|e| e.kind),
            Some(LoginErrorKind::Network)
        );
    }
}
