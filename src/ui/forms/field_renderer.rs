//! Field rendering utilities for forms

use crate::state::{Field, FieldError, FieldValue, FormField};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw a form field using FormField from the domain layer
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool, has_error: bool) {
    let border_style = if has_error {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let content = match &field.value {
        FieldValue::Checkbox(checked) => checkbox_line(field, *checked, is_active),
        FieldValue::Select { selected, .. } => select_line(field, selected.is_none(), is_active),
        FieldValue::Text(_) | FieldValue::Secret(_) => text_line(field, is_active),
    };

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn text_line(field: &FormField, is_active: bool) -> Line<'static> {
    let display_value = field.display_value();
    let cursor = if is_active { "▌" } else { "" };

    if display_value.is_empty() {
        return Line::from(vec![
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
            Span::styled(field.placeholder.clone(), Style::default().fg(Color::DarkGray)),
        ]);
    }

    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(display_value, style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ])
}

fn select_line(field: &FormField, is_placeholder: bool, is_active: bool) -> Line<'static> {
    let value_style = if is_placeholder {
        Style::default().fg(Color::DarkGray)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let arrow_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    Line::from(vec![
        Span::styled("◂ ", arrow_style),
        Span::styled(field.display_value(), value_style),
        Span::styled(" ▸", arrow_style),
    ])
}

fn checkbox_line(field: &FormField, checked: bool, is_active: bool) -> Line<'static> {
    let mark_style = if checked {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mark = if checked { "[x] " } else { "[ ] " };

    Line::from(vec![
        Span::styled(mark, mark_style),
        Span::raw(field.label.clone()),
    ])
}

/// Draw the inline message for a failed rule, or nothing
pub fn draw_field_error(frame: &mut Frame, area: Rect, message: Option<String>) {
    if let Some(message) = message {
        let line = Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Inline message for a field, given its error state
pub fn error_message(field: Field, error: Option<FieldError>) -> Option<String> {
    error.map(|e| e.message(field))
}

/// Draw a line of dim help text
pub fn draw_help_text(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_empty_text_shows_placeholder() {
        let field = FormField::text("name", "Name", "Your name");
        assert_eq!(line_text(&text_line(&field, false)), "Your name");
        assert_eq!(line_text(&text_line(&field, true)), "▌Your name");
    }

    #[test]
    fn test_secret_is_masked() {
        let mut field = FormField::secret("password", "Password", "");
        field.set_text("abc".to_string());
        assert_eq!(line_text(&text_line(&field, false)), "•••");
    }

    #[test]
    fn test_checkbox_mark() {
        let field = FormField::checkbox("privacyTerms", "I agree");
        assert_eq!(line_text(&checkbox_line(&field, true, false)), "[x] I agree");
        assert_eq!(line_text(&checkbox_line(&field, false, false)), "[ ] I agree");
    }

    #[test]
    fn test_select_shows_placeholder_between_arrows() {
        let field = FormField::select("profession", "Profession", "Pick", vec!["QA".to_string()]);
        assert_eq!(line_text(&select_line(&field, true, true)), "◂ Pick ▸");
    }

    #[test]
    fn test_error_message_only_when_failing() {
        assert_eq!(error_message(Field::Name, None), None);
        assert_eq!(
            error_message(Field::Name, Some(FieldError::MissingField)).as_deref(),
            Some("Name is required")
        );
    }
}
