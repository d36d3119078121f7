//! Submission flow: one request, then a toast and maybe a redirect

use super::BackendClientTrait;
use crate::state::{FormData, Toast, ToastStyle, View};

const SUCCESS_TITLE: &str = "Registered.";
const SUCCESS_DESCRIPTION: &str = "Registration completed successfully.";
const FAILURE_TITLE: &str = "Registration failed";
const FAILURE_DESCRIPTION: &str = "Could not complete the new registration";

/// What the UI should do once a submission settles
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub toast: Toast,
    /// View to navigate to; only set on success
    pub redirect: Option<View>,
}

impl SubmitOutcome {
    pub fn succeeded(&self) -> bool {
        self.redirect.is_some()
    }
}

/// Send `data` to the backend exactly once.
///
/// Every failure cause maps to the same user-facing error toast; the cause
/// itself only goes to the log. Nothing is retried.
pub async fn submit_registration(
    backend: &dyn BackendClientTrait,
    data: &FormData,
    toast_style: ToastStyle,
) -> SubmitOutcome {
    tracing::info!("Submitting registration");

    match backend.submit_registration(data).await {
        Ok(()) => {
            tracing::info!("Registration accepted");
            SubmitOutcome {
                toast: Toast::success(SUCCESS_TITLE, SUCCESS_DESCRIPTION)
                    .styled(toast_style),
                redirect: Some(View::Registrations),
            }
        }
        Err(err) => {
            tracing::warn!("Registration failed: {err}");
            SubmitOutcome {
                toast: Toast::error(FAILURE_TITLE, FAILURE_DESCRIPTION)
                    .styled(toast_style),
                redirect: None,
            }
        }
    }
}
