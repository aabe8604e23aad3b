//! Pure view functions. Reads `AppState`, draws the frame, never mutates.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::features::{login, validated_form};
use crate::state::{AppState, Screen};
use crate::widgets::{ERROR_COLOR, FOCUS_COLOR, HINT_COLOR};

pub fn render(state: &AppState, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    frame.render_widget(Paragraph::new(tabs_line(state.screen)), chunks[0]);

    match state.screen {
        Screen::Form => validated_form::render_form_screen(frame, &state.form, chunks[1]),
        Screen::Login => login::render_login_screen(frame, &state.login, chunks[1]),
    }

    frame.render_widget(Paragraph::new(status_line(state)), chunks[2]);
}

fn tabs_line(active: Screen) -> Line<'static> {
    let mut spans = vec![Span::styled(
        " formauth ",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    for (key, screen) in [("F1", Screen::Form), ("F2", Screen::Login)] {
        let style = if screen == active {
            Style::default()
                .fg(Color::Black)
                .bg(FOCUS_COLOR)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(HINT_COLOR)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {key} {} ", screen.title()), style));
    }
    Line::from(spans)
}

fn status_line(state: &AppState) -> Line<'static> {
    if let Some(status) = &state.status {
        return Line::from(Span::styled(
            format!(" {status}"),
            Style::default().fg(ERROR_COLOR),
        ));
    }

    let session = match state.login.component.profile() {
        Some(profile) => format!(" Signed in as {}", profile.display_name()),
        None if state.login.component.is_exchanging() => " Signing in...".to_string(),
        None => " Not signed in".to_string(),
    };
    Line::from(Span::styled(session, Style::default().fg(HINT_COLOR)))
}
