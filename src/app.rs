//! Application core: key handling and the submit path

use crate::api::{ApiClient, SignupApi};
use crate::config::AppConfig;
use crate::platform;
use crate::state::{AppState, Focus, View, WizardButton};
use crate::token::TokenStore;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App<A: SignupApi> {
    /// Current application state
    pub state: AppState,
    /// Client for the platform API
    pub api: A,
    /// Destination for the sign-up token
    pub tokens: TokenStore,
    /// Whether the app should quit
    quit: bool,
}

impl App<ApiClient> {
    /// Create an App wired to the real API client
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().unwrap_or_default();
        let api = ApiClient::new(&config);
        tracing::debug!(endpoint = api.endpoint(), "api client ready");
        Ok(Self::with_api(api, TokenStore::new()).await)
    }
}

impl<A: SignupApi> App<A> {
    /// Create an App over any API implementation
    pub async fn with_api(api: A, tokens: TokenStore) -> Self {
        let mut state = AppState::default();
        state.api_connected = api.check_connection().await;
        Self {
            state,
            api,
            tokens,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Error dialog is modal; it eats every key until dismissed
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        match self.state.current_view {
            View::Signup => self.handle_signup_key(key).await,
            View::Done => {
                self.handle_done_key(key);
                Ok(())
            }
        }
    }

    async fn handle_signup_key(&mut self, key: KeyEvent) -> Result<()> {
        let on_buttons = self.state.focus == Focus::Buttons;

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => self.toggle_focus(),
            // Submit shortcut works from anywhere on the final step
            KeyCode::Char('s') if key.modifiers.contains(platform::SUBMIT_MODIFIER) => {
                self.submit().await;
            }
            KeyCode::Esc => {
                self.state.retreat();
            }
            // Buttons row navigation
            KeyCode::Left | KeyCode::Char('h') if on_buttons => self.state.prev_button(),
            KeyCode::Right | KeyCode::Char('l') if on_buttons => self.state.next_button(),
            KeyCode::Enter if on_buttons => self.activate_selected_button().await,
            // Account-type selection
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down | KeyCode::Char(' ')
                if self.state.step.is_last() =>
            {
                self.state.toggle_account_type();
            }
            KeyCode::Enter => self.confirm_step().await,
            // Field input
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.input_char(c);
            }
            KeyCode::Backspace => self.state.backspace(),
            _ => {}
        }
        Ok(())
    }

    fn handle_done_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
            self.quit = true;
        }
    }

    fn toggle_focus(&mut self) {
        self.state.focus = match self.state.focus {
            Focus::Field => Focus::Buttons,
            Focus::Buttons => Focus::Field,
        };
    }

    /// Enter pressed while editing: advance, or submit on the final step.
    /// A blocked attempt touches the field so its message becomes visible.
    async fn confirm_step(&mut self) {
        if self.state.step.is_last() {
            if self.state.can_submit() {
                self.submit().await;
            } else {
                let field = self.state.step.field();
                self.state.form.touch(field);
            }
        } else {
            self.state.advance();
        }
    }

    async fn activate_selected_button(&mut self) {
        match self.state.selected_wizard_button() {
            WizardButton::Prev => {
                self.state.retreat();
            }
            WizardButton::Next => {
                self.state.advance();
            }
            WizardButton::Submit => self.submit().await,
        }
    }

    /// Fire the createUser mutation and hand the payload to the token store
    async fn submit(&mut self) {
        if !self.state.can_submit() {
            return;
        }
        let values = self.state.form.values();
        let Some(account_type) = values.account_type else {
            return;
        };

        tracing::info!(account_type = account_type.as_str(), "submitting sign-up");
        match self
            .api
            .create_user(&values.email, &values.password, account_type)
            .await
        {
            Ok(payload) => match self.tokens.save(payload) {
                Ok(_) => {
                    self.state.token_path =
                        self.tokens.path().map(|p| p.display().to_string());
                    self.state.current_view = View::Done;
                }
                Err(err) => {
                    tracing::error!(error = %err, "token could not be saved");
                    self.state.push_error(format!(
                        "Account was created but the token could not be saved: {err}"
                    ));
                }
            },
            Err(err) => {
                tracing::error!(error = %err, "createUser mutation failed");
                self.state.push_error(format!("Sign-up failed: {err}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockSignupApi;
    use crate::state::{AccountType, SignupField, SignupStep};
    use anyhow::anyhow;
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn connected_mock() -> MockSignupApi {
        let mut api = MockSignupApi::new();
        api.expect_check_connection().return_const(true);
        api
    }

    async fn app_with(api: MockSignupApi) -> (tempfile::TempDir, App<MockSignupApi>) {
        let dir = tempfile::tempdir().unwrap();
        let tokens = TokenStore::at_path(dir.path().join("token.json"));
        let app = App::with_api(api, tokens).await;
        (dir, app)
    }

    async fn type_str(app: &mut App<MockSignupApi>, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    /// Email and password entered and advanced past; wizard on the final step
    async fn walk_to_final_step(app: &mut App<MockSignupApi>) {
        type_str(app, "a@b.com").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.step, SignupStep::Password);
        type_str(app, "Weak1!aa").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.step, SignupStep::AccountType);
    }

    #[tokio::test]
    async fn test_connection_probe_sets_flag() {
        let mut api = MockSignupApi::new();
        api.expect_check_connection().return_const(false);
        let (_dir, app) = app_with(api).await;
        assert!(!app.state.api_connected);
    }

    #[tokio::test]
    async fn test_enter_does_not_advance_past_invalid_email() {
        let mut api = connected_mock();
        api.expect_create_user().never();
        let (_dir, mut app) = app_with(api).await;

        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.step, SignupStep::Email);

        type_str(&mut app, "nope").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.step, SignupStep::Email);
        assert_eq!(
            app.state.visible_error(SignupField::Email),
            Some("Please enter a valid email")
        );
    }

    #[tokio::test]
    async fn test_esc_retreats_and_is_noop_on_first_step() {
        let mut api = connected_mock();
        api.expect_create_user().never();
        let (_dir, mut app) = app_with(api).await;

        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.state.step, SignupStep::Email);

        walk_to_final_step(&mut app).await;
        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.state.step, SignupStep::Password);
    }

    #[tokio::test]
    async fn test_backspace_edits_active_field() {
        let mut api = connected_mock();
        api.expect_create_user().never();
        let (_dir, mut app) = app_with(api).await;

        type_str(&mut app, "ab").await;
        app.handle_key(key(KeyCode::Backspace)).await.unwrap();
        assert_eq!(app.state.form.email.as_text(), "a");
    }

    #[tokio::test]
    async fn test_submit_blocked_without_account_type() {
        let mut api = connected_mock();
        api.expect_create_user().never();
        let (_dir, mut app) = app_with(api).await;

        walk_to_final_step(&mut app).await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert_eq!(app.state.current_view, View::Signup);
        assert_eq!(
            app.state.visible_error(SignupField::AccountType),
            Some("Account type is required")
        );
    }

    #[tokio::test]
    async fn test_successful_submit_stores_token_and_finishes() {
        let mut api = connected_mock();
        api.expect_create_user()
            .withf(|email, password, account_type| {
                email == "a@b.com"
                    && password == "Weak1!aa"
                    && *account_type == AccountType::Client
            })
            .times(1)
            .returning(|_, _, _| Ok(json!({"createUser": "tok-123"})));
        let (_dir, mut app) = app_with(api).await;

        walk_to_final_step(&mut app).await;
        // first toggle selects Client
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert_eq!(app.state.current_view, View::Done);
        let stored = app.tokens.load().unwrap().expect("token file written");
        assert_eq!(stored.payload, json!({"createUser": "tok-123"}));

        // any confirm key on the done view quits
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_submit_via_buttons_row() {
        let mut api = connected_mock();
        api.expect_create_user()
            .times(1)
            .returning(|_, _, _| Ok(json!({"createUser": "tok"})));
        let (_dir, mut app) = app_with(api).await;

        walk_to_final_step(&mut app).await;
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        // primary button (Submit) is highlighted on entry
        assert_eq!(app.state.selected_wizard_button(), WizardButton::Submit);
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert_eq!(app.state.current_view, View::Done);
    }

    #[tokio::test]
    async fn test_prev_button_retreats() {
        let mut api = connected_mock();
        api.expect_create_user().never();
        let (_dir, mut app) = app_with(api).await;

        walk_to_final_step(&mut app).await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        app.handle_key(key(KeyCode::Left)).await.unwrap();
        assert_eq!(app.state.selected_wizard_button(), WizardButton::Prev);
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.step, SignupStep::Password);
    }

    #[tokio::test]
    async fn test_failed_submit_shows_error_dialog() {
        let mut api = connected_mock();
        api.expect_create_user()
            .times(1)
            .returning(|_, _, _| Err(anyhow!("email already registered")));
        let (_dir, mut app) = app_with(api).await;

        walk_to_final_step(&mut app).await;
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert_eq!(app.state.current_view, View::Signup);
        assert!(app.state.has_errors());
        let message = app.state.current_error().unwrap().to_string();
        assert!(message.contains("email already registered"));

        // dialog is modal: typing is swallowed, Enter dismisses
        app.handle_key(key(KeyCode::Char('x'))).await.unwrap();
        assert!(app.state.has_errors());
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert!(!app.state.has_errors());
        assert!(app.tokens.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_submit_shortcut_on_final_step() {
        let mut api = connected_mock();
        api.expect_create_user()
            .times(1)
            .returning(|_, _, _| Ok(json!({"createUser": "tok"})));
        let (_dir, mut app) = app_with(api).await;

        walk_to_final_step(&mut app).await;
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        app.handle_key(KeyEvent::new(
            KeyCode::Char('s'),
            platform::SUBMIT_MODIFIER,
        ))
        .await
        .unwrap();

        assert_eq!(app.state.current_view, View::Done);
    }

    #[tokio::test]
    async fn test_submit_shortcut_is_noop_before_final_step() {
        let mut api = connected_mock();
        api.expect_create_user().never();
        let (_dir, mut app) = app_with(api).await;

        type_str(&mut app, "a@b.com").await;
        app.handle_key(KeyEvent::new(
            KeyCode::Char('s'),
            platform::SUBMIT_MODIFIER,
        ))
        .await
        .unwrap();
        assert_eq!(app.state.current_view, View::Signup);
    }
}
