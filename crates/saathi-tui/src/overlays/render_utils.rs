//! Shared rendering utilities for overlays.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::common::truncate_to_width;

/// Computes a centered overlay rect clamped to the terminal area.
pub fn calculate_overlay_area(area: Rect, max_width: u16, max_height: u16) -> Rect {
    let width = max_width.min(area.width.saturating_sub(4)).max(1);
    let height = max_height.min(area.height.saturating_sub(2)).max(1);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Clears the overlay area and draws the titled container, returning the
/// inner rect for content.
pub fn render_overlay_container(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// A key/action pair for the hint line.
pub struct InputHint {
    pub key: &'static str,
    pub action: &'static str,
}

/// Renders the hint line at the bottom of an overlay.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint]) {
    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default()));
        }
        spans.push(Span::styled(
            hint.key,
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Renders one labeled input field. Secret fields are masked; the focused
/// field gets a visible cursor.
pub fn render_input_line(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    masked: bool,
) {
    let shown = if masked {
        "*".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let label_style = if focused {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let max = usize::from(area.width).saturating_sub(label.len() + 3);
    let mut spans = vec![
        Span::styled(format!("{label}: "), label_style),
        Span::raw(truncate_to_width(&shown, max)),
    ];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Green)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_area_is_clamped_and_centered() {
        let area = Rect::new(0, 0, 80, 24);
        let overlay = calculate_overlay_area(area, 60, 12);
        assert_eq!(overlay.width, 60);
        assert_eq!(overlay.height, 12);
        assert_eq!(overlay.x, 10);
        assert_eq!(overlay.y, 6);

        let tiny = calculate_overlay_area(Rect::new(0, 0, 20, 6), 60, 12);
        assert!(tiny.width <= 16);
        assert!(tiny.height <= 4);
    }
}
