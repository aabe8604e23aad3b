//! Login view: form while signed out, profile afterwards.

use formauth_core::components::LoginPhase;
use formauth_core::components::login::PASSWORD;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::{CONTROLS, LoginControl, LoginView};
use crate::widgets::{
    ERROR_COLOR, FOCUS_COLOR, HINT_COLOR, button_line, centered_area, error_line, hint_line,
    input_line, render_container,
};

const SCREEN_WIDTH: u16 = 64;
const SCREEN_HEIGHT: u16 = 16;

pub fn render_login_screen(frame: &mut Frame, view: &LoginView, area: Rect) {
    let popup = centered_area(area, SCREEN_WIDTH, SCREEN_HEIGHT);
    let title = match view.component.phase() {
        LoginPhase::Authenticated(_) => "Profile",
        _ => "Login",
    };
    let inner = render_container(frame, popup, title, FOCUS_COLOR);

    let lines = match view.component.phase() {
        LoginPhase::Authenticated(_) => profile_lines(view),
        LoginPhase::Exchanging => exchanging_lines(),
        LoginPhase::Unauthenticated => form_lines(view, inner.width),
    };
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn form_lines(view: &LoginView, width: u16) -> Vec<Line<'static>> {
    let component = &view.component;
    let focused = view.focused();
    let mut lines = Vec::new();

    for control in CONTROLS {
        let has_focus = control == focused;
        match control {
            LoginControl::Text(name) => {
                let Some(field) = component.form().field(name) else {
                    continue;
                };
                lines.push(input_line(
                    field.label,
                    field.value().as_text(),
                    field.placeholder,
                    has_focus,
                    name == PASSWORD,
                    width,
                ));
                match component.field_message(name) {
                    Some(message) => lines.push(error_line(message)),
                    None => lines.push(Line::from("")),
                }
            }
            LoginControl::Submit => {
                lines.push(button_line("Login", component.can_submit(), has_focus));
            }
        }
    }

    if let Some(err) = component.last_error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            err.user_message(),
            Style::default().fg(ERROR_COLOR),
        )));
    }

    lines.push(Line::from(""));
    lines.push(hint_line("Tab/↑↓ move · Enter login · F1 form · Esc quit"));
    lines
}

fn exchanging_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            "Logging in...",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        hint_line("Esc to quit"),
    ]
}

fn profile_lines(view: &LoginView) -> Vec<Line<'static>> {
    let component = &view.component;
    let mut lines = Vec::new();

    if let Some(picture) = component.profile().and_then(|p| p.picture()) {
        lines.push(Line::from(vec![
            Span::styled("Picture  ", Style::default().fg(HINT_COLOR)),
            Span::styled(
                picture.to_string(),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]));
        lines.push(Line::from(""));
    }

    if let Some(welcome) = component.welcome_line() {
        lines.push(Line::from(Span::styled(
            welcome,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
    }

    lines.push(Line::from(""));
    lines.push(button_line("Logout", true, true));
    lines.push(Line::from(""));
    lines.push(hint_line("Enter/l logout · F1 form · Esc quit"));
    lines
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use formauth_core::auth::{LoginError, LoginErrorKind, Profile};
    use formauth_core::components::LoginComponent;
    use formauth_core::components::login::{EMAIL, EMAIL_REQUIRED_MESSAGE};
    use formauth_core::session::{Session, SessionStore};
    use formauth_core::store::MemoryStore;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use serde_json::json;

    use super::*;

    fn view() -> LoginView {
        let sessions = SessionStore::new(Arc::new(MemoryStore::new()));
        LoginView::new(LoginComponent::restore(sessions).unwrap())
    }

    fn screen_text(view: &LoginView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| render_login_screen(frame, view, frame.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn fill(view: &mut LoginView) {
        let form = view.component.form_mut();
        form.set_text(EMAIL, Some("a@b.com".into())).unwrap();
        form.set_text(PASSWORD, Some("secret".into())).unwrap();
    }

    #[test]
    fn test_untouched_form_has_no_messages() {
        let text = screen_text(&view());
        assert!(text.contains("John@doe.com"));
        assert!(!text.contains(EMAIL_REQUIRED_MESSAGE));
    }

    #[test]
    fn test_touched_empty_email_shows_message() {
        let mut v = view();
        v.component.form_mut().touch(EMAIL).unwrap();
        assert!(screen_text(&v).contains(EMAIL_REQUIRED_MESSAGE));
    }

    #[test]
    fn test_password_is_masked() {
        let mut v = view();
        fill(&mut v);
        let text = screen_text(&v);
        assert!(text.contains("******"));
        assert!(!text.contains("secret"));
    }

    #[test]
    fn test_failed_login_shows_error() {
        let mut v = view();
        fill(&mut v);
        v.component.begin_submit().unwrap();
        v.component.finish_submit(Err(LoginError::new(
            LoginErrorKind::AuthRejected,
            "Wrong email or password.",
        )));
        assert!(screen_text(&v).contains("Login rejected. Wrong email or password."));
    }

    #[test]
    fn test_profile_view_shows_picture_and_welcome() {
        let mut v = view();
        fill(&mut v);
        v.component.begin_submit().unwrap();
        v.component.finish_submit(Ok(Session {
            token: "abc".to_string(),
            profile: Profile::new(
                json!({"email": "a@b.com", "picture": "https://img/a.png"})
                    .as_object()
                    .cloned()
                    .unwrap(),
            ),
        }));

        let text = screen_text(&v);
        assert!(text.contains("https://img/a.png"));
        assert!(text.contains("Welcome, a@b.com"));
        assert!(text.contains("[ Logout ]"));
    }
}
