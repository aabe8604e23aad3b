//! Validated form key handling.

use crossterm::event::{KeyCode, KeyEvent};
use formauth_core::form::FormError;

use super::{FormControl, FormView, Notice, controls};
use crate::common::{Nav, edit_text, paste_text};

pub fn handle_key(view: &mut FormView, key: KeyEvent) {
    if let Some(nav) = Nav::from_key(&key) {
        move_focus(view, nav);
        return;
    }

    match (key.code, view.focused()) {
        (KeyCode::Enter, _) => submit(view),
        (KeyCode::Char(' '), FormControl::GenderOption(gender)) => {
            let _ = view.component.select_gender(gender);
        }
        (KeyCode::Char(' '), FormControl::Activity(name)) => toggle(view, name),
        (_, FormControl::Text(name)) => {
            edit_text(view.component.form_mut(), name, &key);
        }
        _ => {}
    }
}

pub fn handle_paste(view: &mut FormView, text: &str) {
    if let FormControl::Text(name) = view.focused() {
        paste_text(view.component.form_mut(), name, text);
    }
}

fn move_focus(view: &mut FormView, nav: Nav) {
    // Leaving a text input counts as a blur.
    if let FormControl::Text(name) = view.focused() {
        let _ = view.component.form_mut().touch(name);
    }
    view.focus = nav.apply(view.focus, controls().len());
}

fn toggle(view: &mut FormView, name: &str) {
    let form = view.component.form_mut();
    let current = form
        .field(name)
        .and_then(|f| f.value().as_flag())
        .unwrap_or(false);
    let _ = form.set_flag(name, !current);
}

fn submit(view: &mut FormView) {
    match view.component.submit() {
        Ok(submission) => match serde_json::to_string(&submission) {
            Ok(json) => view.notice = Some(Notice::Submitted(json)),
            Err(err) => tracing::warn!("Failed to encode submission: {err}"),
        },
        Err(FormError::SubmitDisabled(fields)) => {
            view.component.form_mut().touch_all();
            view.notice = Some(Notice::Blocked(fields));
        }
        Err(err) => tracing::warn!("Submit failed: {err}"),
    }
}
