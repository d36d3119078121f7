//! Form domain layer
//!
//! Type-safe field values, the registration form and its validation rules.

#![allow(dead_code)]

mod field;
mod form_state;
pub mod validation;

pub use field::{FieldValue, FormField};
pub use form_state::{Form, RegistrationForm};
pub use validation::{Field, FieldError};
