//! Transient toast notifications

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Default on-screen lifetime of a toast
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(6000);

/// Toast severity, selects colors and icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "✔",
            Self::Error => "✖",
        }
    }
}

/// Screen corner a toast is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastPosition {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Lifetime and anchor applied to every toast the app shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastStyle {
    pub duration: Duration,
    pub position: ToastPosition,
}

impl Default for ToastStyle {
    fn default() -> Self {
        Self {
            duration: DEFAULT_TOAST_DURATION,
            position: ToastPosition::default(),
        }
    }
}

/// A transient, auto-dismissing message
#[derive(Debug, Clone)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub duration: Duration,
    pub dismissible: bool,
    pub position: ToastPosition,
    /// When the toast was first shown
    pub shown_at: Instant,
}

impl Toast {
    /// Duration of the slide-in animation
    const SLIDE_DURATION: Duration = Duration::from_millis(200);

    pub fn success(title: &str, description: &str) -> Self {
        Self::new(Severity::Success, title, description)
    }

    pub fn error(title: &str, description: &str) -> Self {
        Self::new(Severity::Error, title, description)
    }

    fn new(severity: Severity, title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            severity,
            duration: DEFAULT_TOAST_DURATION,
            dismissible: true,
            position: ToastPosition::default(),
            shown_at: Instant::now(),
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_position(mut self, position: ToastPosition) -> Self {
        self.position = position;
        self
    }

    /// Apply the configured lifetime and anchor
    pub fn styled(self, style: ToastStyle) -> Self {
        self.with_duration(style.duration).with_position(style.position)
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.duration
    }

    /// Slide-in progress from 0.0 (hidden) to 1.0 (fully shown), eased
    pub fn slide_progress(&self) -> f32 {
        let elapsed = self.shown_at.elapsed();
        if elapsed >= Self::SLIDE_DURATION {
            return 1.0;
        }
        let progress = elapsed.as_secs_f32() / Self::SLIDE_DURATION.as_secs_f32();
        simple_easing::cubic_out(progress)
    }
}

/// Toasts currently on screen, oldest first
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, toast: Toast) {
        tracing::debug!("Showing {:?} toast: {}", toast.severity, toast.title);
        self.toasts.push(toast);
    }

    /// Drop toasts whose duration has elapsed
    pub fn prune_expired(&mut self) {
        self.prune_expired_at(Instant::now());
    }

    pub fn prune_expired_at(&mut self, now: Instant) {
        self.toasts.retain(|t| !t.is_expired_at(now));
    }

    /// Dismiss the newest dismissible toast; returns whether one was removed
    pub fn dismiss_latest(&mut self) -> bool {
        match self.toasts.iter().rposition(|t| t.dismissible) {
            Some(index) => {
                self.toasts.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Toast> {
        self.toasts.iter()
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }
}
