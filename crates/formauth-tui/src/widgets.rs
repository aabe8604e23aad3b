//! Small rendering helpers shared by the screens.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear};
use unicode_width::UnicodeWidthStr;

pub const FOCUS_COLOR: Color = Color::Cyan;
pub const ERROR_COLOR: Color = Color::Red;
pub const HINT_COLOR: Color = Color::DarkGray;

/// Centers a box of at most `width` x `height` inside `area`.
pub fn centered_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Clears `area`, draws a titled border and returns the padded inner area.
pub fn render_container(frame: &mut Frame, area: Rect, title: &str, border_color: Color) -> Rect {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, area);

    Rect::new(
        area.x + 2,
        area.y + 1,
        area.width.saturating_sub(4),
        area.height.saturating_sub(2),
    )
}

fn focus_marker(focused: bool) -> Span<'static> {
    if focused {
        Span::styled("› ", Style::default().fg(FOCUS_COLOR))
    } else {
        Span::raw("  ")
    }
}

/// One labelled text input line.
///
/// Empty inputs show the placeholder dimmed. Masked inputs render one `*`
/// per character.
pub fn input_line(
    label: &str,
    value: Option<&str>,
    placeholder: Option<&str>,
    focused: bool,
    masked: bool,
    width: u16,
) -> Line<'static> {
    let label_width = 12;
    let label = format!("{label:<label_width$}");
    let value_style = if focused {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let content = match value.filter(|v| !v.is_empty()) {
        Some(text) if masked => Span::styled("*".repeat(text.chars().count()), value_style),
        Some(text) => Span::styled(
            tail_to_width(text, usize::from(width).saturating_sub(label_width + 4)),
            value_style,
        ),
        None => Span::styled(
            placeholder.unwrap_or_default().to_string(),
            Style::default().fg(HINT_COLOR),
        ),
    };

    let mut spans = vec![focus_marker(focused), Span::raw(label), content];
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(FOCUS_COLOR)));
    }
    Line::from(spans)
}

/// Checkbox (`[x]`) or radio (`(•)`) line.
pub fn choice_line(label: &str, checked: bool, radio: bool, focused: bool) -> Line<'static> {
    let mark = match (radio, checked) {
        (true, true) => "(•)",
        (true, false) => "( )",
        (false, true) => "[x]",
        (false, false) => "[ ]",
    };
    let style = if focused {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(vec![
        focus_marker(focused),
        Span::styled(format!("{mark} {label}"), style),
    ])
}

/// Button line; disabled buttons are dimmed and crossed out.
pub fn button_line(label: &str, enabled: bool, focused: bool) -> Line<'static> {
    let style = match (enabled, focused) {
        (false, _) => Style::default()
            .fg(HINT_COLOR)
            .add_modifier(Modifier::CROSSED_OUT),
        (true, true) => Style::default()
            .fg(Color::Black)
            .bg(FOCUS_COLOR)
            .add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(FOCUS_COLOR),
    };
    Line::from(vec![
        focus_marker(focused),
        Span::styled(format!("[ {label} ]"), style),
    ])
}

/// Indented error line under a control.
pub fn error_line(message: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("    {message}"),
        Style::default().fg(ERROR_COLOR),
    ))
}

pub fn hint_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(text.to_string(), Style::default().fg(HINT_COLOR)))
}

/// Keeps the end of `text` so the cursor side stays visible.
fn tail_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width || max_width < 2 {
        return text.to_string();
    }
    let mut out: Vec<char> = Vec::new();
    let mut used = 1;
    for c in text.chars().rev() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        out.push(c);
    }
    out.reverse();
    format!("…{}", out.into_iter().collect::<String>())
}
