//! Reusable UI components

mod alert;
mod button;
mod dialog;

pub use alert::{render_alert, ALERT_HEIGHT};
pub use button::{render_button, BUTTON_HEIGHT};
pub use dialog::render_error_dialog;
