//! Registrations list view

use crate::app::App;
use crate::state::Registration;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Draw the registrations list
pub fn draw_list(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!(" Registrations ({}) ", app.state.registrations.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if let Some(err) = &app.state.registrations_error {
        let content = Paragraph::new(vec![
            Line::from(Span::styled(err.as_str(), Style::default().fg(Color::Red))),
            Line::from(""),
            Line::from(Span::styled(
                "Press 'r' to retry or 'n' for a new registration.",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(block);
        frame.render_widget(content, area);
        return;
    }

    if app.state.registrations.is_empty() {
        let content = Paragraph::new("No registrations yet.\nPress 'n' for a new registration.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Split area for header and list
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let header = Paragraph::new(Line::from(Span::styled(
        format_row("", "#", "Name", "E-mail", "Profession", "Created"),
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(header, chunks[0]);

    let items: Vec<ListItem> = app
        .state
        .registrations
        .iter()
        .enumerate()
        .map(|(idx, registration)| {
            let is_selected = idx == app.state.selected_index;
            let style = if is_selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(row_text(registration, is_selected), style)))
        })
        .collect();

    // ListState keeps the selected row scrolled into view
    let mut list_state = ListState::default().with_selected(Some(app.state.selected_index));
    frame.render_stateful_widget(List::new(items), chunks[1], &mut list_state);
}

fn row_text(registration: &Registration, is_selected: bool) -> String {
    let prefix = if is_selected { "▸" } else { " " };
    format_row(
        prefix,
        &registration.display_id(),
        &registration.name,
        &registration.email,
        &registration.profession,
        &registration.created_label(),
    )
}

fn format_row(prefix: &str, id: &str, name: &str, email: &str, profession: &str, created: &str) -> String {
    format!(
        "{prefix:1} {:>4}  {:<20} {:<28} {:<14} {}",
        truncate_str(id, 4),
        truncate_str(name, 20),
        truncate_str(email, 28),
        truncate_str(profession, 14),
        created
    )
}

/// Truncate to `max_len` characters, marking the cut with "..."
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
