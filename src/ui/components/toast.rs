//! Toast overlay component

use crate::state::{Severity, Toast, ToastPosition};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Maximum width of a toast, borders included
const TOAST_MAX_WIDTH: u16 = 44;

/// Render every live toast, newest closest to its anchor corner
pub fn render_toasts<'a>(frame: &mut Frame, toasts: impl DoubleEndedIterator<Item = &'a Toast>) {
    let area = frame.area();
    let mut offsets = [0u16; 4];

    for toast in toasts.rev() {
        let slot = &mut offsets[corner_index(toast.position)];
        let Some(rect) = toast_area(area, toast, *slot) else {
            continue;
        };
        *slot += rect.height;
        render_toast(frame, rect, toast);
    }
}

fn corner_index(position: ToastPosition) -> usize {
    match position {
        ToastPosition::TopLeft => 0,
        ToastPosition::TopRight => 1,
        ToastPosition::BottomLeft => 2,
        ToastPosition::BottomRight => 3,
    }
}

/// Where a toast lands, `stacked` rows away from its corner.
///
/// Returns `None` when the terminal is too small to fit it.
fn toast_area(area: Rect, toast: &Toast, stacked: u16) -> Option<Rect> {
    let width = TOAST_MAX_WIDTH.min(area.width);
    if width < 8 {
        return None;
    }
    let lines = wrap_text(&toast.description, (width - 4) as usize);
    // borders + title + description lines
    let height = 2 + 1 + lines.len() as u16;
    if stacked + height > area.height {
        return None;
    }

    // Slide in from the anchored edge
    let hidden = ((1.0 - toast.slide_progress()) * width as f32) as u16;
    let (x, y) = match toast.position {
        ToastPosition::TopLeft => (area.x, area.y + stacked),
        ToastPosition::TopRight => (area.right() - width + hidden, area.y + stacked),
        ToastPosition::BottomLeft => (area.x, area.bottom() - stacked - height),
        ToastPosition::BottomRight => (area.right() - width + hidden, area.bottom() - stacked - height),
    };
    let visible_width = width - hidden.min(width);
    if visible_width == 0 {
        return None;
    }

    Some(Rect {
        x,
        y,
        width: visible_width,
        height,
    })
}

fn render_toast(frame: &mut Frame, area: Rect, toast: &Toast) {
    let color = match toast.severity {
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
    };

    frame.render_widget(Clear, area);

    let mut title = vec![Span::styled(
        format!("{} {}", toast.severity.icon(), toast.title),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    if toast.dismissible {
        title.push(Span::styled("  Esc", Style::default().fg(Color::DarkGray)));
    }

    let mut content = vec![Line::from(title)];
    for line in wrap_text(&toast.description, area.width.saturating_sub(4) as usize) {
        content.push(Line::from(line));
    }

    let widget = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(widget, area);
}

/// Wrap text to fit within a maximum width
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            let current_len = current_line.chars().count();
            if current_len + word.chars().count() + 1 > max_width && !current_line.is_empty() {
                lines.push(current_line);
                current_line = String::new();
            }
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
