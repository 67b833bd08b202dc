//! Top-level rendering: menu bar, resolved content, status line, overlay.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::features::router::{self, Resolution};
use crate::features::{landing, menu, route, timing};
use crate::state::AppState;
use crate::views::View;

const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

pub fn render(app: &AppState, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    menu::render(frame, chunks[0], &app.tui);
    render_content(app, frame, chunks[1]);
    render_status(app, frame, chunks[2]);

    if let Some(overlay) = &app.overlay {
        overlay.render(frame, frame.area(), &app.tui);
    }
}

fn render_content(app: &AppState, frame: &mut Frame, area: Rect) {
    match router::resolve(&app.tui) {
        Resolution::Content(View::Timing) => timing::render(frame, area),
        Resolution::Content(View::Route) => route::render(frame, area),
        // Withheld draws the landing backdrop; gated content never renders
        // without a session.
        Resolution::Landing | Resolution::Withheld | Resolution::Content(_) => {
            landing::render(frame, area);
        }
    }
}

fn render_status(app: &AppState, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    if app.tui.calls.any_running() {
        let spinner = SPINNER_FRAMES[app.tui.spinner_frame % SPINNER_FRAMES.len()];
        spans.push(Span::styled(
            format!("{spinner} "),
            Style::default().fg(Color::Green),
        ));
    }
    if let Some(notice) = &app.tui.notice {
        spans.push(Span::raw(notice.as_str()));
    }
    spans.push(Span::styled(
        "  ←/→ menu · enter open · 1-7 sections · a tips · l sign in/out · s sign up · q quit",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
