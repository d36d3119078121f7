//! Application state and core logic

use crate::backend::{submit_registration, BackendClientTrait, HttpBackend, SubmitOutcome};
use crate::config::SignupConfig;
use crate::state::{AppState, Form, Registration, SubmitPhase, ToastStyle, View};
use anyhow::Result;
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Results of background requests, delivered back to the UI loop
#[derive(Debug)]
pub enum AppEvent {
    Submitted(SubmitOutcome),
    RegistrationsLoaded(std::result::Result<Vec<Registration>, String>),
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Backend client shared with background tasks
    backend: Arc<dyn BackendClientTrait>,
    /// Backend address, shown in the header
    pub backend_url: String,
    /// Lifetime and anchor of toasts
    toast_style: ToastStyle,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    /// Whether the app should quit
    quit: bool,
    /// Status bar message
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App talking to the configured backend
    pub fn new(config: &SignupConfig) -> Result<Self> {
        let backend = HttpBackend::new(config.backend_url(), config.request_timeout())?;
        tracing::info!("Using backend at {}", backend.form_url());

        Ok(Self::with_backend(
            Arc::new(backend),
            config.backend_url().to_string(),
            config.professions(),
            config.toast_style(),
        ))
    }

    /// Create an App around an existing backend client
    pub fn with_backend(
        backend: Arc<dyn BackendClientTrait>,
        backend_url: String,
        professions: Vec<String>,
        toast_style: ToastStyle,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(professions),
            backend,
            backend_url,
            toast_style,
            events_tx,
            events_rx,
            quit: false,
            status_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether something on screen is animating or waiting on the network
    pub fn is_busy(&self) -> bool {
        self.state.submit_phase.is_submitting()
            || self.state.toasts.iter().any(|t| t.slide_progress() < 1.0)
    }

    /// Per-frame housekeeping: expire toasts and apply finished requests
    pub fn tick(&mut self) {
        self.state.toasts.prune_expired();
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Submitted(outcome) => self.apply_outcome(outcome),
            AppEvent::RegistrationsLoaded(Ok(registrations)) => {
                tracing::debug!("Loaded {} registrations", registrations.len());
                self.state.set_registrations(registrations);
            }
            AppEvent::RegistrationsLoaded(Err(err)) => {
                self.state.registrations_error = Some(err);
            }
        }
    }

    /// Show the outcome's toast and follow its redirect, if any
    fn apply_outcome(&mut self, outcome: SubmitOutcome) {
        tracing::debug!(succeeded = outcome.succeeded(), "Submission finished");
        self.state.toasts.push(outcome.toast);
        match outcome.redirect {
            Some(view) => {
                self.state.clear_form();
                self.state.submit_phase = SubmitPhase::Succeeded;
                self.navigate(view);
            }
            None => self.state.submit_phase = SubmitPhase::Idle,
        }
    }

    /// Handle a key press
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Clear any status messages on key press
        self.status_message = None;

        if key.code == KeyCode::Esc && self.state.toasts.dismiss_latest() {
            return Ok(());
        }

        match self.state.current_view {
            View::Form => self.handle_form_key(key),
            View::Registrations => self.handle_registrations_key(key),
        }

        Ok(())
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        self.state.current_view = view;
        if view == View::Registrations {
            self.state.selected_index = 0;
            self.reload_registrations();
        }
    }

    /// Handle keys in the registration form
    fn handle_form_key(&mut self, key: KeyEvent) {
        let form = &mut self.state.form;
        let on_buttons = form.is_buttons_row_active();
        let on_choice = form
            .active_kind()
            .is_some_and(|kind| !form.field(kind).accepts_text());

        match key.code {
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => self.submit(),
            KeyCode::Enter if on_buttons => self.submit(),
            KeyCode::Enter => form.next_field(),
            KeyCode::Char(' ') if on_choice => form.activate(),
            KeyCode::Right if on_choice => form.activate(),
            KeyCode::Left if on_choice => form.activate_back(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                form.input_char(c)
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    /// Handle keys in the registrations list
    fn handle_registrations_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.state.move_selection_down(),
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Char('r') => self.reload_registrations(),
            KeyCode::Char('n') | KeyCode::Esc => {
                self.state.clear_form();
                self.navigate(View::Form);
            }
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    /// Validate the form and, if it passes, send it in the background
    pub fn submit(&mut self) {
        if self.state.submit_phase.is_submitting() {
            tracing::debug!("Submit ignored, request already in flight");
            return;
        }

        let data = match self.state.form.try_submit(Utc::now()) {
            Ok(data) => data,
            Err(errors) => {
                let (noun, verb) = if errors.len() == 1 {
                    ("field", "needs")
                } else {
                    ("fields", "need")
                };
                self.status_message =
                    Some(format!("{} {noun} {verb} attention", errors.len()));
                return;
            }
        };

        self.state.submit_phase = SubmitPhase::Submitting;
        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        let toast_style = self.toast_style;

        tokio::spawn(async move {
            let outcome = submit_registration(backend.as_ref(), &data, toast_style).await;
            // The receiver only goes away when the app is shutting down
            let _ = tx.send(AppEvent::Submitted(outcome));
        });
    }

    /// Fetch the registrations list in the background
    pub fn reload_registrations(&mut self) {
        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            let result = backend
                .list_registrations()
                .await
                .map_err(|e| {
                    tracing::warn!("Failed to list registrations: {e}");
                    format!("Failed to load registrations: {e}")
                });
            let _ = tx.send(AppEvent::RegistrationsLoaded(result));
        });
    }

    /// Wait for the next background result and apply it
    #[cfg(test)]
    async fn next_event(&mut self) {
        let event = tokio::time::timeout(std::time::Duration::from_secs(5), self.events_rx.recv())
            .await
            .expect("timed out waiting for a background result")
            .expect("event channel closed");
        self.apply_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, MockBackendClientTrait};
    use crate::state::{Field, FieldError, Severity};
    use crossterm::event::KeyEventKind;
    use crossterm::event::KeyEventState;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn app_with(mock: MockBackendClientTrait) -> App {
        App::with_backend(
            Arc::new(mock),
            "http://test".to_string(),
            vec!["Desenvolvedor".to_string(), "QA".to_string()],
            ToastStyle::default(),
        )
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    /// Fill the form the way a user would: type, tab, pick, tick
    async fn fill_valid_form(app: &mut App) {
        type_text(app, "Ana").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(app, "ana@x.com").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(app, "abcdefghij").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        // Placeholder -> Desenvolvedor -> QA
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
    }

    fn expect_list(mock: &mut MockBackendClientTrait) {
        mock.expect_list_registrations().returning(|| Ok(vec![]));
    }

    #[tokio::test]
    async fn test_valid_form_posts_once_then_redirects() {
        let mut mock = MockBackendClientTrait::new();
        mock.expect_submit_registration()
            .withf(|data| {
                data.name == "Ana"
                    && data.email == "ana@x.com"
                    && data.password == "abcdefghij"
                    && data.profession == "QA"
                    && data.privacy_terms
            })
            .times(1)
            .returning(|_| Ok(()));
        expect_list(&mut mock);

        let mut app = app_with(mock);
        fill_valid_form(&mut app).await;
        assert!(app.state.form.is_buttons_row_active());

        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.submit_phase, SubmitPhase::Submitting);

        app.next_event().await;

        assert_eq!(app.state.current_view, View::Registrations);
        assert_eq!(app.state.submit_phase, SubmitPhase::Succeeded);
        assert_eq!(app.state.toasts.len(), 1);
        assert_eq!(app.state.toasts.latest().unwrap().severity, Severity::Success);
        assert_eq!(app.state.form.name.as_text(), "");
    }

    #[tokio::test]
    async fn test_failure_shows_error_toast_and_stays() {
        let mut mock = MockBackendClientTrait::new();
        mock.expect_submit_registration()
            .times(1)
            .returning(|_| Err(BackendError::Transport("connection refused".to_string())));
        mock.expect_list_registrations().never();

        let mut app = app_with(mock);
        fill_valid_form(&mut app).await;
        app.handle_key(ctrl('s')).await.unwrap();
        app.next_event().await;

        assert_eq!(app.state.current_view, View::Form);
        assert_eq!(app.state.submit_phase, SubmitPhase::Idle);
        assert_eq!(app.state.toasts.len(), 1);
        assert_eq!(app.state.toasts.latest().unwrap().severity, Severity::Error);
        // Input survives so the user can retry
        assert_eq!(app.state.form.name.as_text(), "Ana");
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_backend() {
        let mut mock = MockBackendClientTrait::new();
        mock.expect_submit_registration().never();

        let mut app = app_with(mock);
        app.handle_key(ctrl('s')).await.unwrap();

        assert_eq!(app.state.submit_phase, SubmitPhase::Idle);
        assert_eq!(app.state.form.errors().len(), 5);
        assert_eq!(
            app.status_message.as_deref(),
            Some("5 fields need attention")
        );
        assert!(app.state.toasts.is_empty());
    }

    #[tokio::test]
    async fn test_unchecked_terms_block_submit() {
        let mut mock = MockBackendClientTrait::new();
        mock.expect_submit_registration().never();

        let mut app = app_with(mock);
        fill_valid_form(&mut app).await;
        app.state.form.set_value(Field::PrivacyTerms, "false");
        app.submit();

        assert_eq!(
            app.state.form.errors().get(Field::PrivacyTerms),
            Some(FieldError::NotAccepted)
        );
        assert_eq!(app.state.form.active_kind(), Some(Field::PrivacyTerms));
        assert_eq!(app.status_message.as_deref(), Some("1 field needs attention"));
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_ignored() {
        let mut mock = MockBackendClientTrait::new();
        mock.expect_submit_registration()
            .times(1)
            .returning(|_| Ok(()));
        expect_list(&mut mock);

        let mut app = app_with(mock);
        fill_valid_form(&mut app).await;
        app.submit();
        app.submit();
        app.next_event().await;

        assert_eq!(app.state.toasts.len(), 1);
    }

    #[tokio::test]
    async fn test_redirect_loads_registrations() {
        let mut mock = MockBackendClientTrait::new();
        mock.expect_submit_registration().returning(|_| Ok(()));
        mock.expect_list_registrations().times(1).returning(|| {
            Ok(vec![Registration {
                name: "Ana".to_string(),
                ..Default::default()
            }])
        });

        let mut app = app_with(mock);
        fill_valid_form(&mut app).await;
        app.submit();
        app.next_event().await;
        app.next_event().await;

        assert_eq!(app.state.registrations.len(), 1);
        assert_eq!(app.state.registrations[0].name, "Ana");
    }

    #[tokio::test]
    async fn test_list_failure_is_reported_in_view() {
        let mut mock = MockBackendClientTrait::new();
        mock.expect_list_registrations()
            .returning(|| Err(BackendError::Status { status: 404, body: String::new() }));

        let mut app = app_with(mock);
        app.navigate(View::Registrations);
        app.next_event().await;

        let err = app.state.registrations_error.as_deref().unwrap();
        assert!(err.contains("404"), "got: {err}");
    }

    #[tokio::test]
    async fn test_escape_dismisses_toast_before_quitting() {
        let mut app = app_with(MockBackendClientTrait::new());
        app.state
            .toasts
            .push(crate::state::Toast::error("Registration failed", ""));

        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert!(app.state.toasts.is_empty());
        assert!(!app.should_quit());

        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_new_registration_from_list() {
        let mut mock = MockBackendClientTrait::new();
        expect_list(&mut mock);

        let mut app = app_with(mock);
        app.navigate(View::Registrations);
        app.next_event().await;

        app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
        assert_eq!(app.state.current_view, View::Form);
        assert_eq!(app.state.submit_phase, SubmitPhase::Idle);
    }

    #[tokio::test]
    async fn test_escape_in_list_returns_to_form() {
        let mut mock = MockBackendClientTrait::new();
        expect_list(&mut mock);

        let mut app = app_with(mock);
        app.navigate(View::Registrations);
        app.next_event().await;

        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.state.current_view, View::Form);
        assert!(!app.should_quit());
    }

    #[tokio::test]
    async fn test_backtab_and_up_move_focus_backwards() {
        let mut app = app_with(MockBackendClientTrait::new());
        assert_eq!(app.state.form.active_kind(), Some(Field::Name));

        // Wraps from the first field to the Register button
        app.handle_key(key(KeyCode::BackTab)).await.unwrap();
        assert!(app.state.form.is_buttons_row_active());

        app.handle_key(key(KeyCode::Up)).await.unwrap();
        assert_eq!(app.state.form.active_kind(), Some(Field::PrivacyTerms));

        app.handle_key(key(KeyCode::BackTab)).await.unwrap();
        assert_eq!(app.state.form.active_kind(), Some(Field::Profession));
    }

    #[tokio::test]
    async fn test_enter_on_a_field_advances_instead_of_submitting() {
        let mut mock = MockBackendClientTrait::new();
        mock.expect_submit_registration().never();

        let mut app = app_with(mock);
        type_text(&mut app, "Ana").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert_eq!(app.state.form.active_kind(), Some(Field::Email));
        assert_eq!(app.state.submit_phase, SubmitPhase::Idle);
        assert!(app.state.form.errors().is_empty());
        assert!(app.status_message.is_none());
    }

    #[tokio::test]
    async fn test_tick_applies_finished_submission() {
        let mut mock = MockBackendClientTrait::new();
        mock.expect_submit_registration()
            .returning(|_| Err(BackendError::Timeout("slow".to_string())));

        let mut app = app_with(mock);
        fill_valid_form(&mut app).await;
        app.submit();

        for _ in 0..50 {
            tokio::time::sleep(Duration::from_millis(10)).await;
            app.tick();
            if !app.state.submit_phase.is_submitting() {
                break;
            }
        }

        assert_eq!(app.state.submit_phase, SubmitPhase::Idle);
        assert_eq!(app.state.toasts.len(), 1);
    }

    #[tokio::test]
    async fn test_space_types_into_text_fields() {
        let mut app = app_with(MockBackendClientTrait::new());
        type_text(&mut app, "Ana Lu").await;
        assert_eq!(app.state.form.name.as_text(), "Ana Lu");
    }
}
