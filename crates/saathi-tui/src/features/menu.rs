//! Top menu bar.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::state::TuiState;
use crate::views::View;

pub fn render(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let mut spans = vec![Span::styled(
        " Swachh Saathi ",
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )];

    for (i, view) in View::MENU.iter().enumerate() {
        let selected = i == tui.menu_cursor;
        let style = if selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else if *view == tui.view {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", view.title()), style));
        spans.push(Span::raw(" "));
    }

    let session_label = match tui.session.identity() {
        Some(identity) => identity
            .display_name
            .clone()
            .unwrap_or_else(|| identity.email.clone()),
        None => "not signed in".to_string(),
    };
    spans.push(Span::styled(
        format!("  {session_label}"),
        Style::default().fg(Color::DarkGray),
    ));

    let bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(bar, area);
}
