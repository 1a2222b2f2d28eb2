//! Layout components (header, status bar)

use crate::state::{AppState, Focus, SignupStep, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into header, body and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header
            Constraint::Min(0),    // body
            Constraint::Length(1), // status bar
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// Title line plus the wizard step indicator
pub fn draw_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut lines = vec![Line::from(Span::styled(
        " Sereno",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))];

    if state.current_view == View::Signup {
        lines.push(Line::from(Span::styled(
            format!(
                " Step {} of {} — {}",
                state.step.index() + 1,
                SignupStep::COUNT,
                state.step.label()
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Key hints and the connection indicator
pub fn draw_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![Span::styled(
        if state.api_connected {
            " ● online "
        } else {
            " ○ offline "
        },
        Style::default().fg(if state.api_connected {
            Color::Green
        } else {
            Color::DarkGray
        }),
    )];

    if state.current_view == View::Signup {
        let hints: &[(&str, &str)] = match (state.focus, state.step) {
            (Focus::Buttons, _) => &[
                ("←/→", "choose"),
                ("Enter", "activate"),
                ("Tab", "back to field"),
            ],
            (Focus::Field, SignupStep::AccountType) => &[
                ("←/→", "select type"),
                ("Enter", "create account"),
                ("Esc", "back"),
            ],
            (Focus::Field, _) => &[("Enter", "next"), ("Tab", "buttons"), ("Esc", "back")],
        };
        for (key, action) in hints {
            spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
            spans.push(Span::raw(format!(": {action}  ")));
        }
        spans.push(Span::styled("Ctrl+C", Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(": quit"));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::Gray)),
        area,
    );
}
