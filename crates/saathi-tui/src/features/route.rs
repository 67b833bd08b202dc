//! Live-route screen: one gauge per collection vehicle.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use saathi_core::schedule::{TruckStatus, truck_routes};

pub fn render(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Truck Routes ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut y = inner.y;
    for truck in truck_routes() {
        if y + 3 > inner.y + inner.height {
            break;
        }
        let status_color = match truck.status {
            TruckStatus::Active => Color::Green,
            TruckStatus::Completed => Color::DarkGray,
        };
        let header = Line::from(vec![
            Span::styled(truck.id, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("  {}  ", truck.location)),
            Span::styled(truck.status.label(), Style::default().fg(status_color)),
        ]);
        frame.render_widget(Paragraph::new(header), Rect::new(inner.x, y, inner.width, 1));

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(status_color))
            .percent(u16::from(truck.progress_percent))
            .label(format!("{}%  ETA {}", truck.progress_percent, truck.eta));
        frame.render_widget(gauge, Rect::new(inner.x, y + 1, inner.width, 1));

        let driver = Line::styled(
            format!("Driver: {}", truck.driver),
            Style::default().fg(Color::DarkGray),
        );
        frame.render_widget(Paragraph::new(driver), Rect::new(inner.x, y + 2, inner.width, 1));
        y += 4;
    }
}
