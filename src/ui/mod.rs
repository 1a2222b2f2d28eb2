//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::state::{AppState, View};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let (header_area, body_area, status_area) = layout::create_layout(area);

    layout::draw_header(frame, header_area, state);

    match state.current_view {
        View::Signup => forms::draw_signup(frame, body_area, state),
        View::Done => forms::draw_done(frame, body_area, state),
    }

    layout::draw_status_bar(frame, status_area, state);

    // Modal overlay for submission failures
    if let Some(message) = state.current_error() {
        components::render_error_dialog(frame, message);
    }
}
