//! Collection-timing screen.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use saathi_core::schedule::{PickupStatus, area_schedules};

pub fn render(frame: &mut Frame, area: Rect) {
    let header = Row::new(["Area", "Morning", "Evening", "Status", "Next", "Distance"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = area_schedules().iter().map(|schedule| {
        Row::new(vec![
            Cell::from(schedule.area),
            Cell::from(schedule.morning_window),
            Cell::from(schedule.evening_window),
            Cell::from(schedule.status.label()).style(status_style(schedule.status)),
            Cell::from(schedule.next_pickup),
            Cell::from(schedule.distance),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(16),
            Constraint::Length(20),
            Constraint::Length(20),
            Constraint::Length(12),
            Constraint::Length(18),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Collection Timings "),
    );

    frame.render_widget(table, area);
}

fn status_style(status: PickupStatus) -> Style {
    let color = match status {
        PickupStatus::OnTime => Color::Green,
        PickupStatus::Delayed => Color::Red,
        PickupStatus::Completed => Color::DarkGray,
        PickupStatus::InProgress => Color::Yellow,
    };
    Style::default().fg(color)
}
