//! Field-level validation rules for the registration form

use super::field::UNSELECTED;
use std::collections::BTreeMap;
use std::fmt;
use validator::Validate;

/// Minimum accepted password length, in characters
pub const PASSWORD_MIN_LEN: usize = 10;

/// Fields of the registration form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
    Profession,
    PrivacyTerms,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::Password,
        Field::Profession,
        Field::PrivacyTerms,
    ];

    /// Wire name of the field in the submitted payload
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::Profession => "profession",
            Self::PrivacyTerms => "privacyTerms",
        }
    }
}

/// Which rule a field failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    MissingField,
    InvalidFormat,
    TooShort { min: usize },
    InvalidSelection,
    NotAccepted,
}

impl FieldError {
    /// Inline message shown under the offending field
    pub fn message(&self, field: Field) -> String {
        match (self, field) {
            (Self::MissingField, Field::Name) => "Name is required".to_string(),
            (Self::MissingField, Field::Email) => "E-mail is required".to_string(),
            (Self::MissingField, Field::Password) => "Password is required".to_string(),
            (Self::MissingField, _) => "This field is required".to_string(),
            (Self::InvalidFormat, _) => "Enter a valid e-mail address".to_string(),
            (Self::TooShort { min }, _) => format!("Must be at least {min} characters"),
            (Self::InvalidSelection, _) => "Select your profession".to_string(),
            (Self::NotAccepted, _) => "You must agree to the privacy terms".to_string(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField => write!(f, "missing"),
            Self::InvalidFormat => write!(f, "invalid format"),
            Self::TooShort { min } => write!(f, "shorter than {min}"),
            Self::InvalidSelection => write!(f, "invalid selection"),
            Self::NotAccepted => write!(f, "not accepted"),
        }
    }
}

/// Raw values as typed by the user, borrowed from the form
#[derive(Debug, Clone, Copy)]
pub struct FieldValues<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub profession: &'a str,
    pub privacy_terms: bool,
}

/// Per-field error state; a field without an entry is valid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.errors.iter().map(|(f, e)| (*f, *e))
    }

    /// Record the outcome of re-checking one field
    pub fn set(&mut self, field: Field, result: Option<FieldError>) {
        match result {
            Some(err) => {
                self.errors.insert(field, err);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }
}

/// Format rules for the free-text fields that have one
#[derive(Debug, Validate)]
struct FormatRules {
    #[validate(email)]
    email: String,
    #[validate(length(min = 10))]
    password: String,
}

impl FormatRules {
    fn new(values: &FieldValues<'_>) -> Self {
        Self {
            email: values.email.trim().to_string(),
            password: values.password.to_string(),
        }
    }
}

/// Check a single field against its rules
pub fn validate_field(field: Field, values: &FieldValues<'_>) -> Option<FieldError> {
    match field {
        Field::Name => required(values.name),
        Field::Email => required(values.email).or_else(|| format_error(field, values)),
        Field::Password => required(values.password).or_else(|| format_error(field, values)),
        Field::Profession => (values.profession.is_empty() || values.profession == UNSELECTED)
            .then_some(FieldError::InvalidSelection),
        Field::PrivacyTerms => (!values.privacy_terms).then_some(FieldError::NotAccepted),
    }
}

/// Check every field
pub fn validate(values: &FieldValues<'_>) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for field in Field::ALL {
        errors.set(field, validate_field(field, values));
    }
    errors
}

fn required(value: &str) -> Option<FieldError> {
    value.trim().is_empty().then_some(FieldError::MissingField)
}

/// Map a failed format rule on `field` to its error kind
fn format_error(field: Field, values: &FieldValues<'_>) -> Option<FieldError> {
    let errors = FormatRules::new(values).validate().err()?;
    if !errors.field_errors().contains_key(field.key()) {
        return None;
    }
    match field {
        Field::Email => Some(FieldError::InvalidFormat),
        Field::Password => Some(FieldError::TooShort {
            min: PASSWORD_MIN_LEN,
        }),
        _ => None,
    }
}
