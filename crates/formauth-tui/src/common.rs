//! Input helpers shared by both screens.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use formauth_core::form::Form;

/// Focus movement requested by a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Next,
    Prev,
}

impl Nav {
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => Some(Nav::Next),
            KeyCode::BackTab | KeyCode::Up => Some(Nav::Prev),
            _ => None,
        }
    }

    /// Moves `focus` within `0..len`, wrapping at both ends.
    pub fn apply(self, focus: usize, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        match self {
            Nav::Next => (focus + 1) % len,
            Nav::Prev => (focus + len - 1) % len,
        }
    }
}

/// Applies a typing key to a text field.
///
/// Returns `true` when the key was consumed. Typing marks the field touched.
pub fn edit_text(form: &mut Form, name: &str, key: &KeyEvent) -> bool {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return false;
    }

    let current = form
        .field(name)
        .and_then(|f| f.value().as_text())
        .unwrap_or_default()
        .to_string();

    let next = match key.code {
        KeyCode::Char(c) => {
            let mut text = current;
            text.push(c);
            text
        }
        KeyCode::Backspace => {
            let mut text = current;
            text.pop();
            text
        }
        _ => return false,
    };

    form.set_text(name, Some(next)).is_ok()
}

/// Appends pasted text to a text field. Newlines are dropped.
pub fn paste_text(form: &mut Form, name: &str, pasted: &str) {
    let mut text = form
        .field(name)
        .and_then(|f| f.value().as_text())
        .unwrap_or_default()
        .to_string();
    text.extend(pasted.chars().filter(|c| *c != '\n' && *c != '\r'));
    let _ = form.set_text(name, Some(text));
}
