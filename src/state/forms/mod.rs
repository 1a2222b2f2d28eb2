//! Form domain layer
//!
//! Field value objects, the sign-up form, and its validation rules.

mod field;
mod form_state;
mod validation;

pub use field::{FieldValue, FormField};
pub use form_state::{SignupForm, SignupValues};
pub use validation::{
    validate, validate_account_type, validate_email, validate_password, SignupField,
    ValidationErrors, PASSWORD_MIN_LEN, PASSWORD_SYMBOLS,
};
