//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod registrations;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);

    // Draw main content based on current view
    match app.state.current_view {
        View::Form => forms::draw_registration_form(frame, main_area, app),
        View::Registrations => registrations::draw_list(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Toasts float above everything else
    components::render_toasts(frame, app.state.toasts.iter());
}
