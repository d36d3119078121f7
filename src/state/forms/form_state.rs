//! Registration form state

use super::field::FormField;
use super::validation::{self, Field, FieldValues, ValidationErrors};
use crate::state::FormData;
use chrono::{DateTime, Utc};

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Index of the focus stop holding the Register button
const BUTTONS_ROW: usize = Field::ALL.len();

// Registration Form
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub name: FormField,
    pub email: FormField,
    pub password: FormField,
    pub profession: FormField,
    pub privacy_terms: FormField,
    pub active_field_index: usize,
    /// Set by the first submit attempt; afterwards every edit re-validates
    /// the edited field
    pub submit_attempted: bool,
    errors: ValidationErrors,
}

impl RegistrationForm {
    pub fn new(professions: Vec<String>) -> Self {
        Self {
            name: FormField::text(Field::Name.key(), "Name", "Your name"),
            email: FormField::text(Field::Email.key(), "E-mail", "Your e-mail"),
            password: FormField::secret(Field::Password.key(), "Password", "Your password"),
            profession: FormField::select(
                Field::Profession.key(),
                "Profession",
                "Select your profession...",
                professions,
            ),
            privacy_terms: FormField::checkbox(
                Field::PrivacyTerms.key(),
                "I agree to the privacy terms",
            ),
            active_field_index: 0,
            submit_attempted: false,
            errors: ValidationErrors::default(),
        }
    }

    /// Returns true if the buttons row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == BUTTONS_ROW
    }

    /// Form field the cursor is on, `None` on the buttons row
    pub fn active_kind(&self) -> Option<Field> {
        Field::ALL.get(self.active_field_index).copied()
    }

    pub fn field(&self, field: Field) -> &FormField {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::Profession => &self.profession,
            Field::PrivacyTerms => &self.privacy_terms,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut FormField {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::Profession => &mut self.profession,
            Field::PrivacyTerms => &mut self.privacy_terms,
        }
    }

    /// Current per-field errors
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn values(&self) -> FieldValues<'_> {
        FieldValues {
            name: self.name.as_text(),
            email: self.email.as_text(),
            password: self.password.as_text(),
            profession: self.profession.as_text(),
            privacy_terms: self.privacy_terms.is_checked(),
        }
    }

    /// Type a character into the active field
    pub fn input_char(&mut self, c: char) {
        self.edit_active(|field| field.push_char(c));
    }

    /// Delete the last character of the active field
    pub fn backspace(&mut self) {
        self.edit_active(FormField::pop_char);
    }

    /// Space/Right on the active field: toggle the checkbox or advance the select
    pub fn activate(&mut self) {
        self.edit_active(|field| {
            field.toggle();
            field.next_option();
        });
    }

    /// Left on the active field: step the select backwards
    pub fn activate_back(&mut self) {
        self.edit_active(FormField::prev_option);
    }

    /// Overwrite a field's value, as if the user had typed it
    pub fn set_value(&mut self, field: Field, value: &str) {
        let target = self.field_mut(field);
        match field {
            Field::Profession => target.select_value(value),
            Field::PrivacyTerms => {
                if target.is_checked() != matches!(value, "true") {
                    target.toggle();
                }
            }
            _ => target.set_text(value.to_string()),
        }
        self.revalidate(field);
    }

    fn edit_active(&mut self, edit: impl FnOnce(&mut FormField)) {
        if let Some(kind) = self.active_kind() {
            edit(self.field_mut(kind));
            self.revalidate(kind);
        }
    }

    fn revalidate(&mut self, field: Field) {
        if self.submit_attempted {
            let result = validation::validate_field(field, &self.values());
            self.errors.set(field, result);
        }
    }

    /// Run every rule and, if all pass, build the payload stamped with
    /// `created_at`.
    ///
    /// On failure focus moves to the first invalid field.
    pub fn try_submit(&mut self, created_at: DateTime<Utc>) -> Result<FormData, ValidationErrors> {
        self.submit_attempted = true;
        self.errors = validation::validate(&self.values());

        if let Some((first, _)) = self.errors.iter().next() {
            self.active_field_index = Field::ALL
                .iter()
                .position(|f| *f == first)
                .unwrap_or(0);
            return Err(self.errors.clone());
        }

        Ok(FormData {
            name: self.name.as_text().trim().to_string(),
            email: self.email.as_text().trim().to_string(),
            password: self.password.as_text().to_string(),
            profession: self.profession.as_text().to_string(),
            privacy_terms: self.privacy_terms.is_checked(),
            created_at,
        })
    }

    /// Clear values, errors and validation mode
    pub fn reset(&mut self) {
        for field in Field::ALL {
            self.field_mut(field).clear();
        }
        self.active_field_index = 0;
        self.submit_attempted = false;
        self.errors = ValidationErrors::default();
    }
}

impl Form for RegistrationForm {
    fn field_count(&self) -> usize {
        BUTTONS_ROW + 1 // five fields, buttons
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(BUTTONS_ROW);
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        Field::ALL.get(index).map(|f| self.field(*f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::validation::FieldError;
    use crate::state::forms::field::UNSELECTED;
    use chrono::TimeZone;

    fn professions() -> Vec<String> {
        ["Desenvolvedor", "QA", "Outros"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn filled_form() -> RegistrationForm {
        let mut form = RegistrationForm::new(professions());
        form.set_value(Field::Name, "Ana");
        form.set_value(Field::Email, "ana@x.com");
        form.set_value(Field::Password, "abcdefghij");
        form.set_value(Field::Profession, "QA");
        form.set_value(Field::PrivacyTerms, "true");
        form
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_new_has_correct_defaults() {
            let form = RegistrationForm::new(professions());
            assert_eq!(form.active_field_index, 0);
            assert!(!form.submit_attempted);
            assert!(form.errors().is_empty());
            assert_eq!(form.profession.as_text(), UNSELECTED);
            assert!(!form.privacy_terms.is_checked());
        }

        #[test]
        fn test_field_count() {
            let form = RegistrationForm::new(professions());
            assert_eq!(form.field_count(), 6);
        }

        #[test]
        fn test_next_field_cycles() {
            let mut form = RegistrationForm::new(professions());
            for _ in 0..6 {
                form.next_field();
            }
            assert_eq!(form.active_field_index, 0);
        }

        #[test]
        fn test_prev_field_wraps_to_buttons() {
            let mut form = RegistrationForm::new(professions());
            form.prev_field();
            assert!(form.is_buttons_row_active());
            assert!(form.active_kind().is_none());
        }

        #[test]
        fn test_set_active_field_clamps() {
            let mut form = RegistrationForm::new(professions());
            form.set_active_field(100);
            assert_eq!(form.active_field_index, 5);
        }

        #[test]
        fn test_get_field_returns_correct_fields() {
            let form = RegistrationForm::new(professions());
            assert_eq!(form.get_field(0).unwrap().name, "name");
            assert_eq!(form.get_field(1).unwrap().name, "email");
            assert_eq!(form.get_field(2).unwrap().name, "password");
            assert_eq!(form.get_field(3).unwrap().name, "profession");
            assert_eq!(form.get_field(4).unwrap().name, "privacyTerms");
            assert!(form.get_field(5).is_none());
        }
    }

    mod editing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_input_goes_to_active_field() {
            let mut form = RegistrationForm::new(professions());
            form.input_char('A');
            form.next_field();
            form.input_char('b');
            form.backspace();
            form.input_char('c');
            assert_eq!(form.name.as_text(), "A");
            assert_eq!(form.email.as_text(), "c");
        }

        #[test]
        fn test_activate_toggles_checkbox() {
            let mut form = RegistrationForm::new(professions());
            form.set_active_field(4);
            form.activate();
            assert!(form.privacy_terms.is_checked());
            form.activate();
            assert!(!form.privacy_terms.is_checked());
        }

        #[test]
        fn test_activate_cycles_select() {
            let mut form = RegistrationForm::new(professions());
            form.set_active_field(3);
            form.activate();
            assert_eq!(form.profession.as_text(), "Desenvolvedor");
            form.activate_back();
            assert_eq!(form.profession.as_text(), UNSELECTED);
        }

        #[test]
        fn test_typing_on_buttons_row_is_ignored() {
            let mut form = RegistrationForm::new(professions());
            form.set_active_field(5);
            form.input_char('x');
            for field in Field::ALL {
                assert_ne!(form.field(field).as_text(), "x");
            }
        }

        #[test]
        fn test_no_errors_before_first_submit() {
            let mut form = RegistrationForm::new(professions());
            form.input_char('A');
            form.backspace();
            assert!(form.errors().is_empty());
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_valid_form_builds_payload() {
            let mut form = filled_form();
            let data = form.try_submit(stamp()).unwrap();
            assert_eq!(
                data,
                FormData {
                    name: "Ana".to_string(),
                    email: "ana@x.com".to_string(),
                    password: "abcdefghij".to_string(),
                    profession: "QA".to_string(),
                    privacy_terms: true,
                    created_at: stamp(),
                }
            );
        }

        #[test]
        fn test_empty_form_reports_every_field() {
            let mut form = RegistrationForm::new(professions());
            let errors = form.try_submit(stamp()).unwrap_err();
            assert_eq!(errors.len(), 5);
            assert_eq!(errors.get(Field::Name), Some(FieldError::MissingField));
            assert_eq!(errors.get(Field::Profession), Some(FieldError::InvalidSelection));
            assert_eq!(errors.get(Field::PrivacyTerms), Some(FieldError::NotAccepted));
        }

        #[test]
        fn test_failed_submit_focuses_first_invalid_field() {
            let mut form = filled_form();
            form.set_value(Field::Password, "short");
            form.set_active_field(5);
            assert!(form.try_submit(stamp()).is_err());
            assert_eq!(form.active_kind(), Some(Field::Password));
        }

        #[test]
        fn test_unchecked_terms_block_otherwise_valid_form() {
            let mut form = filled_form();
            form.set_value(Field::PrivacyTerms, "false");
            let errors = form.try_submit(stamp()).unwrap_err();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.get(Field::PrivacyTerms), Some(FieldError::NotAccepted));

            form.set_value(Field::PrivacyTerms, "true");
            assert!(form.try_submit(stamp()).is_ok());
        }

        #[test]
        fn test_edit_after_failed_submit_revalidates_field() {
            let mut form = RegistrationForm::new(professions());
            assert!(form.try_submit(stamp()).is_err());
            assert_eq!(form.errors().get(Field::Name), Some(FieldError::MissingField));

            form.set_active_field(0);
            form.input_char('A');
            assert_eq!(form.errors().get(Field::Name), None);

            form.backspace();
            assert_eq!(form.errors().get(Field::Name), Some(FieldError::MissingField));
        }

        #[test]
        fn test_password_short_then_long_enough() {
            let mut form = filled_form();
            form.set_value(Field::Password, "abcdefghi");
            assert!(form.try_submit(stamp()).is_err());
            assert_eq!(
                form.errors().get(Field::Password),
                Some(FieldError::TooShort { min: 10 })
            );
            form.set_active_field(2);
            form.input_char('j');
            assert_eq!(form.errors().get(Field::Password), None);
        }

        #[test]
        fn test_payload_trims_name_and_email() {
            let mut form = filled_form();
            form.set_value(Field::Name, "  Ana ");
            form.set_value(Field::Email, " ana@x.com ");
            let data = form.try_submit(stamp()).unwrap();
            assert_eq!(data.name, "Ana");
            assert_eq!(data.email, "ana@x.com");
        }

        #[test]
        fn test_reset_clears_everything() {
            let mut form = filled_form();
            let _ = form.try_submit(stamp());
            form.reset();
            assert_eq!(form.name.as_text(), "");
            assert_eq!(form.profession.as_text(), UNSELECTED);
            assert!(!form.privacy_terms.is_checked());
            assert!(!form.submit_attempted);
            assert!(form.errors().is_empty());
        }
    }
}
