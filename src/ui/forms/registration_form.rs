//! Registration form rendering

use super::field_renderer::{draw_field, draw_field_error, draw_help_text, error_message};
use crate::app::App;
use crate::state::Field;
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
    Frame,
};

/// Widest the form grows on large terminals
const FORM_MAX_WIDTH: u16 = 64;

/// Draw the registration form centered in `area`
pub fn draw_registration_form(frame: &mut Frame, area: Rect, app: &App) {
    let form_area = centered(area, FORM_MAX_WIDTH);

    let block = Block::default()
        .title(Line::from(Span::styled(
            " Registration Form ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);

    let mut constraints = Vec::with_capacity(Field::ALL.len() * 2 + 2);
    for _ in Field::ALL {
        constraints.push(Constraint::Length(3)); // Field
        constraints.push(Constraint::Length(1)); // Inline error
    }
    constraints.push(Constraint::Length(BUTTON_HEIGHT)); // Register button
    constraints.push(Constraint::Min(0)); // Help text

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(1)
        .split(inner);

    let form = &app.state.form;
    let errors = form.errors();

    for (idx, field) in Field::ALL.iter().enumerate() {
        let error = errors.get(*field);
        draw_field(
            frame,
            chunks[idx * 2],
            form.field(*field),
            form.active_kind() == Some(*field),
            error.is_some(),
        );
        draw_field_error(frame, chunks[idx * 2 + 1], error_message(*field, error));
    }

    let buttons_idx = Field::ALL.len() * 2;
    let submitting = app.state.submit_phase.is_submitting();
    let label = if submitting { "Registering..." } else { "Register" };
    render_action_button(
        frame,
        chunks[buttons_idx],
        label,
        form.is_buttons_row_active(),
        !submitting,
        Some(Color::Blue),
    );

    let help = if form
        .active_kind()
        .is_some_and(|kind| !form.field(kind).accepts_text())
    {
        "Space/←/→ to change, Tab for next field"
    } else {
        "Tab for next field, Ctrl+S to register"
    };
    draw_help_text(frame, chunks[buttons_idx + 1], help);
}

/// Horizontally center a column at most `max_width` wide
fn centered(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
