//! Application state definitions

use super::forms::RegistrationForm;
use super::notification::ToastQueue;
use super::registration::Registration;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Registration form
    #[default]
    Form,
    /// Stored registrations, shown after a successful submit
    Registrations,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Form => "Register",
            Self::Registrations => "Registrations",
        }
    }
}

/// Lifecycle of one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    /// Request in flight; further submits are ignored
    Submitting,
    /// Backend accepted the registration; the redirect has been applied
    Succeeded,
}

impl SubmitPhase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }
}

/// Main application state
pub struct AppState {
    // Navigation
    pub current_view: View,

    // Form
    pub form: RegistrationForm,
    pub submit_phase: SubmitPhase,

    // Registrations list
    pub registrations: Vec<Registration>,
    pub registrations_error: Option<String>,
    pub selected_index: usize,

    // Notifications
    pub toasts: ToastQueue,
}

impl AppState {
    pub fn new(professions: Vec<String>) -> Self {
        Self {
            current_view: View::default(),
            form: RegistrationForm::new(professions),
            submit_phase: SubmitPhase::default(),
            registrations: Vec::new(),
            registrations_error: None,
            selected_index: 0,
            toasts: ToastQueue::default(),
        }
    }

    /// Move selection down
    pub fn move_selection_down(&mut self) {
        let max = self.registrations.len();
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Replace the listed registrations, keeping the selection in range
    pub fn set_registrations(&mut self, registrations: Vec<Registration>) {
        self.registrations = registrations;
        self.registrations_error = None;
        if self.selected_index >= self.registrations.len() {
            self.selected_index = self.registrations.len().saturating_sub(1);
        }
    }

    /// Start a fresh registration
    pub fn clear_form(&mut self) {
        self.form.reset();
        self.submit_phase = SubmitPhase::Idle;
    }
}
