//! Public landing page.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

struct Section {
    heading: &'static str,
    body: &'static str,
}

// Marketing copy, in fixed order.
const SECTIONS: [Section; 7] = [
    Section {
        heading: "Never Miss Your Garbage Collection Again",
        body: "Swachh Saathi keeps you in sync with your city's waste collection: live \
               truck tracking, area timings, and smart disposal tips, all in one place.",
    },
    Section {
        heading: "The Problem",
        body: "Missed pickups pile waste on the street. Residents wait without knowing \
               when the truck will come, and complaints go nowhere.",
    },
    Section {
        heading: "The Solution",
        body: "Real-time schedules and truck locations for your area, so you take the \
               bin out exactly when it matters.",
    },
    Section {
        heading: "How It Works",
        body: "1. Create an account for your area.  2. Check today's timing or track \
               the truck on its route.  3. Get a reminder before the pickup window.",
    },
    Section {
        heading: "Features",
        body: "Area-wise collection timings, live route tracking, AI-powered disposal \
               tips, and feedback straight to your municipality.",
    },
    Section {
        heading: "For Municipalities",
        body: "Publish schedules, monitor fleet progress, and hear from residents. \
               Municipality accounts get an operations view of every ward.",
    },
    Section {
        heading: "Join the Movement",
        body: "Sign up today and make your neighbourhood cleaner, one pickup at a time.",
    },
];

const FOOTER: &str = "feedback · share · terms · privacy";

pub fn render(frame: &mut Frame, area: Rect) {
    let mut y = area.y;
    let bottom = area.y + area.height;

    for (i, section) in SECTIONS.iter().enumerate() {
        if y >= bottom {
            break;
        }
        let heading_style = if i == 0 {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        frame.render_widget(
            Paragraph::new(Line::styled(section.heading, heading_style)),
            Rect::new(area.x, y, area.width, 1),
        );
        y += 1;
        if y >= bottom {
            break;
        }
        let body_height = 2.min(bottom.saturating_sub(y));
        frame.render_widget(
            Paragraph::new(section.body).wrap(Wrap { trim: true }),
            Rect::new(area.x, y, area.width, body_height),
        );
        y += body_height + 1;
    }

    if bottom > area.y {
        let footer = Line::from(Span::styled(FOOTER, Style::default().fg(Color::DarkGray)));
        frame.render_widget(
            Paragraph::new(footer),
            Rect::new(area.x, bottom - 1, area.width, 1),
        );
    }
}
