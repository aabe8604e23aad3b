//! Validated form view.

use formauth_core::components::validated_form::GENDER;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::{FormControl, FormView, Notice, controls};
use crate::widgets::{
    FOCUS_COLOR, button_line, centered_area, choice_line, error_line, hint_line, input_line,
    render_container,
};

const SCREEN_WIDTH: u16 = 64;
const SCREEN_HEIGHT: u16 = 24;

pub fn render_form_screen(frame: &mut Frame, view: &FormView, area: Rect) {
    let popup = centered_area(area, SCREEN_WIDTH, SCREEN_HEIGHT);
    let inner = render_container(frame, popup, "Validated Form", FOCUS_COLOR);

    let lines = form_lines(view, inner.width);
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn form_lines(view: &FormView, width: u16) -> Vec<Line<'static>> {
    let component = &view.component;
    let form = component.form();
    let focused = view.focused();
    let mut lines = Vec::new();
    let mut gender_header = false;
    let mut activity_header = false;

    for control in controls() {
        let has_focus = control == focused;
        match control {
            FormControl::Text(name) => {
                let Some(field) = form.field(name) else {
                    continue;
                };
                lines.push(input_line(
                    field.label,
                    field.value().as_text(),
                    field.placeholder,
                    has_focus,
                    false,
                    width,
                ));
                match component.field_message(name) {
                    Some(message) => lines.push(error_line(&message)),
                    None => lines.push(Line::from("")),
                }
            }
            FormControl::GenderOption(gender) => {
                if !gender_header {
                    gender_header = true;
                    lines.push(section_line("Gender"));
                }
                let checked = component.selected_gender() == Some(gender);
                lines.push(choice_line(gender.as_str(), checked, true, has_focus));
            }
            FormControl::Activity(name) => {
                if !activity_header {
                    activity_header = true;
                    if let Some(message) = component.field_message(GENDER) {
                        lines.push(error_line(&message));
                    }
                    lines.push(section_line("Activities"));
                }
                let Some(field) = form.field(name) else {
                    continue;
                };
                let checked = field.value().as_flag().unwrap_or(false);
                lines.push(choice_line(field.label, checked, false, has_focus));
            }
            FormControl::Submit => {
                lines.push(Line::from(""));
                lines.push(button_line("Submit", component.can_submit(), has_focus));
            }
        }
    }

    match &view.notice {
        Some(Notice::Submitted(json)) => {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Submitted:",
                Style::default().fg(Color::Green),
            )));
            lines.push(Line::from(Span::styled(
                json.clone(),
                Style::default().fg(Color::Green),
            )));
        }
        Some(Notice::Blocked(fields)) => {
            lines.push(Line::from(""));
            lines.push(error_line(&format!("Fix before submitting: {}", fields.join(", "))));
        }
        None => {}
    }

    lines.push(Line::from(""));
    lines.push(hint_line(
        "Tab/↑↓ move · Space select · Enter submit · F2 login · Esc quit",
    ));
    lines
}

fn section_line(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default().fg(Color::White),
    ))
}

#[cfg(test)]
mod tests {
    use formauth_core::components::validated_form::{FIRST_NAME, LAST_NAME};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn screen_text(view: &FormView) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_form_screen(frame, view, frame.area()))
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

    #[test]
    fn test_fresh_form_shows_required_messages() {
        let text = screen_text(&FormView::default());
        assert!(text.contains("First Name is required"));
        assert!(text.contains("You must select a gender."));
        assert!(text.contains("[ Submit ]"));
    }

    #[test]
    fn test_valid_fields_hide_messages() {
        let mut view = FormView::default();
        let form = view.component.form_mut();
        form.set_text(FIRST_NAME, Some("John".into())).unwrap();
        form.set_text(LAST_NAME, Some("Smith".into())).unwrap();

        let text = screen_text(&view);
        assert!(!text.contains("First Name is required"));
        assert!(!text.contains("Last Name must be"));
    }
}
