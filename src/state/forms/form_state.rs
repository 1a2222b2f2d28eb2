//! Sign-up form state

use super::field::FormField;
use super::validation::{validate, SignupField, ValidationErrors};
use crate::state::AccountType;

/// Snapshot of the form's values, the candidate object handed to validation
/// and, once valid, to the API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupValues {
    pub email: String,
    pub password: String,
    pub account_type: Option<AccountType>,
}

/// The three-field sign-up form
#[derive(Debug, Clone)]
pub struct SignupForm {
    pub email: FormField,
    pub password: FormField,
    pub account_type: FormField,
    /// Indexed by [`SignupForm::touched_index`]; untouched fields keep their
    /// error messages hidden so "required" does not flash on a pristine form.
    touched: [bool; 3],
}

impl SignupForm {
    pub fn new() -> Self {
        Self {
            email: FormField::text("email", "Email"),
            password: FormField::secret("password", "Password"),
            account_type: FormField::choice("accountType", "Account Type"),
            touched: [false; 3],
        }
    }

    fn touched_index(field: SignupField) -> usize {
        match field {
            SignupField::Email => 0,
            SignupField::Password => 1,
            SignupField::AccountType => 2,
        }
    }

    pub fn field(&self, field: SignupField) -> &FormField {
        match field {
            SignupField::Email => &self.email,
            SignupField::Password => &self.password,
            SignupField::AccountType => &self.account_type,
        }
    }

    pub fn field_mut(&mut self, field: SignupField) -> &mut FormField {
        match field {
            SignupField::Email => &mut self.email,
            SignupField::Password => &mut self.password,
            SignupField::AccountType => &mut self.account_type,
        }
    }

    /// Mark a field as touched, making its error message visible
    pub fn touch(&mut self, field: SignupField) {
        self.touched[Self::touched_index(field)] = true;
    }

    pub fn is_touched(&self, field: SignupField) -> bool {
        self.touched[Self::touched_index(field)]
    }

    /// Append a character to a text field and mark it touched
    pub fn input_char(&mut self, field: SignupField, c: char) {
        self.field_mut(field).push_char(c);
        self.touch(field);
    }

    /// Remove the last character from a text field and mark it touched
    pub fn backspace(&mut self, field: SignupField) {
        self.field_mut(field).pop_char();
        self.touch(field);
    }

    /// Select the account type and mark the field touched
    pub fn select_account_type(&mut self, choice: AccountType) {
        self.account_type.set_choice(choice);
        self.touch(SignupField::AccountType);
    }

    pub fn values(&self) -> SignupValues {
        SignupValues {
            email: self.email.as_text().to_string(),
            password: self.password.as_text().to_string(),
            account_type: self.account_type.as_choice(),
        }
    }

    /// Run the whole rule table against the current values
    pub fn validate(&self) -> ValidationErrors {
        validate(&self.values())
    }
}

impl Default for SignupForm {
    fn default() -> Self {
        Self::new()
    }
}
