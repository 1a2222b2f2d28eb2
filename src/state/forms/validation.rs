//! Declarative validation rules for the sign-up form
//!
//! Each field owns an ordered rule table; validation reports the first
//! violated rule's message. Rules are re-run on every change so error
//! state always reflects the current values.

use once_cell::sync::Lazy;
use regex::Regex;

use super::form_state::SignupValues;
use crate::state::AccountType;

/// Minimum password length
pub const PASSWORD_MIN_LEN: usize = 8;

/// Symbols accepted by the password complexity rule
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)+$")
        .expect("email pattern is valid")
});

/// Fields of the sign-up form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupField {
    Email,
    Password,
    AccountType,
}

/// A single rule in a field's table
struct Rule {
    message: &'static str,
    check: fn(&str) -> bool,
}

const EMAIL_RULES: &[Rule] = &[
    Rule {
        message: "Email is required",
        check: |v| !v.is_empty(),
    },
    Rule {
        message: "Please enter a valid email",
        check: |v| EMAIL_RE.is_match(v),
    },
];

const PASSWORD_RULES: &[Rule] = &[
    Rule {
        message: "Password is required",
        check: |v| !v.is_empty(),
    },
    Rule {
        message: "Password too short",
        check: |v| v.chars().count() >= PASSWORD_MIN_LEN,
    },
    Rule {
        message: "Password must contain one lowercase letter, one capital letter, one number & one special character",
        check: |v| {
            v.chars().any(|c| c.is_ascii_lowercase())
                && v.chars().any(|c| c.is_ascii_uppercase())
                && v.chars().any(|c| c.is_ascii_digit())
                && v.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
        },
    },
];

fn first_violation(rules: &[Rule], value: &str) -> Option<&'static str> {
    rules
        .iter()
        .find(|rule| !(rule.check)(value))
        .map(|rule| rule.message)
}

/// Validate an email value, returning the first violated rule's message
pub fn validate_email(value: &str) -> Option<&'static str> {
    first_violation(EMAIL_RULES, value)
}

/// Validate a password value, returning the first violated rule's message
pub fn validate_password(value: &str) -> Option<&'static str> {
    first_violation(PASSWORD_RULES, value)
}

/// Validate the account-type selection. Membership in the allowed set is
/// enforced by the enum, so only the required rule can fail.
pub fn validate_account_type(value: Option<AccountType>) -> Option<&'static str> {
    match value {
        Some(_) => None,
        None => Some("Account type is required"),
    }
}

/// Field-to-message mapping produced by a validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
    pub account_type: Option<&'static str>,
}

impl ValidationErrors {
    pub fn get(&self, field: SignupField) -> Option<&'static str> {
        match field {
            SignupField::Email => self.email,
            SignupField::Password => self.password,
            SignupField::AccountType => self.account_type,
        }
    }

    pub fn field_is_valid(&self, field: SignupField) -> bool {
        self.get(field).is_none()
    }

    /// Overall-form validity, gating the submit action
    pub fn is_valid(&self) -> bool {
        self.email.is_none() && self.password.is_none() && self.account_type.is_none()
    }
}

/// Run every field's rule table against the candidate values
pub fn validate(values: &SignupValues) -> ValidationErrors {
    ValidationErrors {
        email: validate_email(&values.email),
        password: validate_password(&values.password),
        account_type: validate_account_type(values.account_type),
    }
}
