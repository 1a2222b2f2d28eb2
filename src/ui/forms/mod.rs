//! Wizard step rendering

mod field_renderer;

use field_renderer::draw_field;

use crate::state::{AccountType, AppState, Focus, SignupStep, WizardButton};
use crate::ui::components::{render_alert, render_button, ALERT_HEIGHT, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const CARD_WIDTH: u16 = 56;
const CARD_HEIGHT: u16 = 14;

/// Draw the active wizard step inside a centered card
pub fn draw_signup(frame: &mut Frame, area: Rect, state: &AppState) {
    let card = centered_rect(area, CARD_WIDTH, CARD_HEIGHT);

    let block = Block::default()
        .title(" Create your account ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let error = state.visible_error(state.step.field());
    let alert_height = if error.is_some() { ALERT_HEIGHT } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // field
            Constraint::Length(alert_height),  // inline alert
            Constraint::Min(0),                // spacer
            Constraint::Length(BUTTON_HEIGHT), // buttons row
        ])
        .margin(1)
        .split(inner);

    let field_active = state.focus == Focus::Field;
    match state.step {
        SignupStep::Email => draw_field(frame, chunks[0], &state.form.email, field_active),
        SignupStep::Password => draw_field(frame, chunks[0], &state.form.password, field_active),
        SignupStep::AccountType => draw_account_type(frame, chunks[0], state, field_active),
    }

    if let Some(message) = error {
        render_alert(frame, chunks[1], message);
    }

    draw_buttons(frame, chunks[3], state);
}

/// Radio-style selector for the account type
fn draw_account_type(frame: &mut Frame, area: Rect, state: &AppState, is_active: bool) {
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let selected = state.form.account_type.as_choice();
    let mut spans = Vec::new();
    for option in AccountType::all() {
        let marker = if selected == Some(option) {
            "(•)"
        } else {
            "( )"
        };
        let style = if selected == Some(option) {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!("{marker} {}", option.label()), style));
        spans.push(Span::raw("    "));
    }

    let block = Block::default()
        .title(format!(" {} ", state.form.account_type.label))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Prev/Next/Submit row for the active step
fn draw_buttons(frame: &mut Frame, area: Rect, state: &AppState) {
    let buttons = state.buttons();
    let constraints: Vec<Constraint> = buttons
        .iter()
        .map(|_| Constraint::Ratio(1, buttons.len() as u32))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let on_buttons = state.focus == Focus::Buttons;
    for (idx, button) in buttons.iter().enumerate() {
        let enabled = match button {
            WizardButton::Prev => true,
            WizardButton::Next => {
                let field = state.step.field();
                !state.form.field(field).is_empty() && state.errors.field_is_valid(field)
            }
            WizardButton::Submit => state.can_submit(),
        };
        render_button(
            frame,
            chunks[idx],
            button.label(),
            on_buttons && idx == state.selected_button,
            enabled,
        );
    }
}

/// Success screen shown after the token was stored
pub fn draw_done(frame: &mut Frame, area: Rect, state: &AppState) {
    let card = centered_rect(area, CARD_WIDTH, 9);

    let mut content = vec![
        Line::from(Span::styled(
            "Account created!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if let Some(path) = &state.token_path {
        content.push(Line::from(format!("Token saved to {path}")));
        content.push(Line::from(""));
    }
    content.push(Line::from(vec![
        Span::raw("Press "),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::raw(" to exit"),
    ]));

    let block = Block::default()
        .title(" Welcome to Sereno ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    frame.render_widget(Paragraph::new(content).block(block), card);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
