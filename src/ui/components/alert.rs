//! Inline alert banner for field validation errors

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows the banner occupies (border + headline + message + border)
pub const ALERT_HEIGHT: u16 = 4;

/// Render a dismissible-looking error banner next to the offending field
pub fn render_alert(frame: &mut Frame, area: Rect, message: &str) {
    let content = vec![
        Line::from(Span::styled(
            "Error!",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(message, Style::default().fg(Color::Red))),
    ];

    let banner = Paragraph::new(content).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(Color::Red)),
    );

    frame.render_widget(banner, area);
}
