//! Reusable UI components

mod button;
mod toast;

pub use button::{render_action_button, BUTTON_HEIGHT};
pub use toast::render_toasts;
