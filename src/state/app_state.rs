//! Application state definitions

use crate::state::forms::{SignupForm, SignupField, ValidationErrors};
use crate::state::wizard::SignupStep;

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Signup,
    /// Shown after a successful submit
    Done,
}

/// Account type offered at sign-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    Client,
    Therapist,
}

impl AccountType {
    /// Wire value sent in the mutation variables
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => "Client",
            Self::Therapist => "Therapist",
        }
    }

    pub fn label(self) -> &'static str {
        self.as_str()
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Client => Self::Therapist,
            Self::Therapist => Self::Client,
        }
    }

    /// All selectable variants, in display order
    pub fn all() -> [Self; 2] {
        [Self::Client, Self::Therapist]
    }
}

/// Which region of the active step has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Field,
    Buttons,
}

/// Navigation buttons shown under the active step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardButton {
    Prev,
    Next,
    Submit,
}

impl WizardButton {
    pub fn label(self) -> &'static str {
        match self {
            Self::Prev => "Prev",
            Self::Next => "Next",
            Self::Submit => "Create account",
        }
    }
}

/// Main application state
pub struct AppState {
    pub current_view: View,
    pub step: SignupStep,
    pub form: SignupForm,
    /// Recomputed on every field change (eager mode)
    pub errors: ValidationErrors,

    // UI state
    pub focus: Focus,
    pub selected_button: usize,
    pub api_connected: bool,
    /// Where the token was written, shown on the done view
    pub token_path: Option<String>,

    /// Modal errors (submission failures), displayed first-in-first-out
    error_queue: Vec<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let form = SignupForm::new();
        let errors = form.validate();
        let mut state = Self {
            current_view: View::Signup,
            step: SignupStep::Email,
            form,
            errors,
            focus: Focus::Field,
            selected_button: 0,
            api_connected: false,
            token_path: None,
            error_queue: Vec::new(),
        };
        state.reset_button_selection();
        state
    }
}

impl AppState {
    /// Re-run validation against the current form values
    pub fn revalidate(&mut self) {
        self.errors = self.form.validate();
    }

    /// Type a character into the active step's field
    pub fn input_char(&mut self, c: char) {
        self.form.input_char(self.step.field(), c);
        self.revalidate();
    }

    /// Delete the last character of the active step's field
    pub fn backspace(&mut self) {
        self.form.backspace(self.step.field());
        self.revalidate();
    }

    /// Select an account type on the final step
    pub fn select_account_type(&mut self, choice: AccountType) {
        self.form.select_account_type(choice);
        self.revalidate();
    }

    /// Cycle the account-type selection (defaults to Client when unset)
    pub fn toggle_account_type(&mut self) {
        let next = match self.form.account_type.as_choice() {
            Some(current) => current.toggle(),
            None => AccountType::Client,
        };
        self.select_account_type(next);
    }

    /// Advance to the next step. Gated on the active step's field being
    /// present and error-free; a blocked attempt touches the field so its
    /// message becomes visible. No-op on the final step.
    pub fn advance(&mut self) -> bool {
        let field = self.step.field();
        self.form.touch(field);
        if self.form.field(field).is_empty() || !self.errors.field_is_valid(field) {
            return false;
        }
        match self.step.next() {
            Some(next) => {
                self.step = next;
                self.focus = Focus::Field;
                self.reset_button_selection();
                true
            }
            None => false,
        }
    }

    /// Go back one step. No-op on the first step.
    pub fn retreat(&mut self) -> bool {
        match self.step.prev() {
            Some(prev) => {
                self.step = prev;
                self.focus = Focus::Field;
                self.reset_button_selection();
                true
            }
            None => false,
        }
    }

    /// Submit is reachable only on the final step with every field valid
    pub fn can_submit(&self) -> bool {
        self.step.is_last() && self.errors.is_valid()
    }

    /// Buttons shown for the active step
    pub fn buttons(&self) -> &'static [WizardButton] {
        match self.step {
            SignupStep::Email => &[WizardButton::Next],
            SignupStep::Password => &[WizardButton::Prev, WizardButton::Next],
            SignupStep::AccountType => &[WizardButton::Prev, WizardButton::Submit],
        }
    }

    /// The currently highlighted button
    pub fn selected_wizard_button(&self) -> WizardButton {
        let buttons = self.buttons();
        buttons[self.selected_button.min(buttons.len() - 1)]
    }

    pub fn next_button(&mut self) {
        self.selected_button = (self.selected_button + 1) % self.buttons().len();
    }

    pub fn prev_button(&mut self) {
        let count = self.buttons().len();
        self.selected_button = (self.selected_button + count - 1) % count;
    }

    /// Highlight the step's primary (right-most) button
    fn reset_button_selection(&mut self) {
        self.selected_button = self.buttons().len() - 1;
    }

    /// The active field's error message, hidden until the field is touched
    pub fn visible_error(&self, field: SignupField) -> Option<&'static str> {
        if self.form.is_touched(field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    /// Queue a modal error message for display
    pub fn push_error(&mut self, message: String) {
        self.error_queue.push(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.first().map(String::as_str)
    }

    /// Dismiss the error currently shown
    pub fn dismiss_error(&mut self) {
        if !self.error_queue.is_empty() {
            self.error_queue.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_email(state: &mut AppState, text: &str) {
        for c in text.chars() {
            state.input_char(c);
        }
    }

    fn state_at_password_step() -> AppState {
        let mut state = AppState::default();
        type_email(&mut state, "a@b.com");
        assert!(state.advance());
        state
    }

    fn state_at_account_type_step() -> AppState {
        let mut state = state_at_password_step();
        for c in "Weak1!aa".chars() {
            state.input_char(c);
        }
        assert!(state.advance());
        state
    }

    mod wizard_navigation {
        use super::*;

        #[test]
        fn test_default_starts_at_email_step() {
            let state = AppState::default();
            assert_eq!(state.current_view, View::Signup);
            assert_eq!(state.step, SignupStep::Email);
        }

        #[test]
        fn test_advance_blocked_on_empty_email() {
            let mut state = AppState::default();
            assert!(!state.advance());
            assert_eq!(state.step, SignupStep::Email);
            // the blocked attempt makes the required message visible
            assert_eq!(
                state.visible_error(SignupField::Email),
                Some("Email is required")
            );
        }

        #[test]
        fn test_advance_blocked_on_invalid_email() {
            let mut state = AppState::default();
            type_email(&mut state, "not-an-email");
            assert!(!state.advance());
            assert_eq!(state.step, SignupStep::Email);
        }

        #[test]
        fn test_advance_with_valid_email() {
            let mut state = AppState::default();
            type_email(&mut state, "a@b.com");
            assert!(state.advance());
            assert_eq!(state.step, SignupStep::Password);
        }

        #[test]
        fn test_advance_blocked_on_weak_password() {
            let mut state = state_at_password_step();
            for c in "abcdefgh".chars() {
                state.input_char(c);
            }
            assert!(!state.advance());
            assert_eq!(state.step, SignupStep::Password);
        }

        #[test]
        fn test_advance_is_noop_on_final_step() {
            let mut state = state_at_account_type_step();
            state.select_account_type(AccountType::Client);
            assert!(!state.advance());
            assert_eq!(state.step, SignupStep::AccountType);
        }

        #[test]
        fn test_retreat_is_noop_on_first_step() {
            let mut state = AppState::default();
            assert!(!state.retreat());
            assert_eq!(state.step, SignupStep::Email);
        }

        #[test]
        fn test_retreat_walks_back() {
            let mut state = state_at_account_type_step();
            assert!(state.retreat());
            assert_eq!(state.step, SignupStep::Password);
            assert!(state.retreat());
            assert_eq!(state.step, SignupStep::Email);
        }

        #[test]
        fn test_retreat_preserves_entered_values() {
            let mut state = state_at_password_step();
            assert!(state.retreat());
            assert_eq!(state.form.email.as_text(), "a@b.com");
        }
    }

    mod submit_gate {
        use super::*;

        #[test]
        fn test_cannot_submit_before_final_step() {
            let state = state_at_password_step();
            assert!(!state.can_submit());
        }

        #[test]
        fn test_cannot_submit_without_account_type() {
            let state = state_at_account_type_step();
            assert!(!state.can_submit());
        }

        #[test]
        fn test_can_submit_when_all_fields_valid() {
            let mut state = state_at_account_type_step();
            state.select_account_type(AccountType::Client);
            assert!(state.can_submit());
        }

        #[test]
        fn test_submit_gate_reacts_to_edits() {
            let mut state = state_at_account_type_step();
            state.select_account_type(AccountType::Therapist);
            assert!(state.can_submit());
            // invalidating an earlier field closes the gate again
            state.retreat();
            state.backspace();
            assert!(state.retreat());
            assert!(!state.errors.is_valid());
        }
    }

    mod buttons {
        use super::*;

        #[test]
        fn test_first_step_has_only_next() {
            let state = AppState::default();
            assert_eq!(state.buttons(), &[WizardButton::Next]);
            assert_eq!(state.selected_wizard_button(), WizardButton::Next);
        }

        #[test]
        fn test_middle_step_has_prev_and_next() {
            let state = state_at_password_step();
            assert_eq!(state.buttons(), &[WizardButton::Prev, WizardButton::Next]);
            // primary button highlighted on entry
            assert_eq!(state.selected_wizard_button(), WizardButton::Next);
        }

        #[test]
        fn test_final_step_has_prev_and_submit() {
            let state = state_at_account_type_step();
            assert_eq!(state.buttons(), &[WizardButton::Prev, WizardButton::Submit]);
            assert_eq!(state.selected_wizard_button(), WizardButton::Submit);
        }

        #[test]
        fn test_button_selection_wraps() {
            let mut state = state_at_password_step();
            state.next_button();
            assert_eq!(state.selected_wizard_button(), WizardButton::Prev);
            state.next_button();
            assert_eq!(state.selected_wizard_button(), WizardButton::Next);
            state.prev_button();
            assert_eq!(state.selected_wizard_button(), WizardButton::Prev);
        }
    }

    mod eager_validation {
        use super::*;

        #[test]
        fn test_error_hidden_until_touched() {
            let state = AppState::default();
            assert_eq!(state.visible_error(SignupField::Email), None);
        }

        #[test]
        fn test_error_appears_while_typing() {
            let mut state = AppState::default();
            state.input_char('a');
            assert_eq!(
                state.visible_error(SignupField::Email),
                Some("Please enter a valid email")
            );
        }

        #[test]
        fn test_error_clears_when_valid() {
            let mut state = AppState::default();
            type_email(&mut state, "a@b.com");
            assert_eq!(state.visible_error(SignupField::Email), None);
        }

        #[test]
        fn test_toggle_account_type_defaults_to_client() {
            let mut state = state_at_account_type_step();
            state.toggle_account_type();
            assert_eq!(
                state.form.account_type.as_choice(),
                Some(AccountType::Client)
            );
            state.toggle_account_type();
            assert_eq!(
                state.form.account_type.as_choice(),
                Some(AccountType::Therapist)
            );
        }
    }

    mod error_queue {
        use super::*;

        #[test]
        fn test_errors_dismiss_in_order() {
            let mut state = AppState::default();
            assert!(!state.has_errors());
            state.push_error("first".to_string());
            state.push_error("second".to_string());
            assert_eq!(state.current_error(), Some("first"));
            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
            state.dismiss_error();
            assert!(!state.has_errors());
            state.dismiss_error(); // no-op on empty queue
        }
    }
}
