//! Application state module

mod app_state;
mod forms;
mod notification;
mod registration;

pub use app_state::*;
pub use forms::*;
pub use notification::*;
pub use registration::*;
