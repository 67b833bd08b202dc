//! Assistant overlay: generated disposal tips plus free-form Q&A.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use saathi_core::assistant::{Tip, TipCategory};

use crate::common::CallKind;
use crate::effects::UiEffect;
use crate::overlays::render_utils::{
    InputHint, calculate_overlay_area, render_hints, render_input_line, render_overlay_container,
};
use crate::overlays::OverlayUpdate;
use crate::state::TuiState;

/// Assistant overlay state.
#[derive(Debug)]
pub struct AssistantState {
    pub tips: Vec<Tip>,
    /// Set when live tips failed and the fallback list is shown.
    pub warning: Option<String>,
    pub question: String,
    pub answer: Option<String>,
}

impl AssistantState {
    /// Opens the overlay and kicks off tip generation.
    pub fn open() -> (Self, Vec<UiEffect>) {
        (
            Self {
                tips: Vec::new(),
                warning: None,
                question: String::new(),
                answer: None,
            },
            vec![UiEffect::FetchTips],
        )
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Enter => {
                let question = self.question.trim().to_string();
                if question.is_empty() || tui.calls.is_running(CallKind::Answer) {
                    return OverlayUpdate::stay();
                }
                self.answer = None;
                OverlayUpdate::stay().with_ui_effects(vec![UiEffect::AskAssistant { question }])
            }
            KeyCode::Backspace => {
                self.question.pop();
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) => {
                self.question.push(c);
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState) {
        let overlay = calculate_overlay_area(area, 64, 18);
        let inner = render_overlay_container(frame, overlay, "AI Tips");

        let mut y = inner.y;
        if tui.calls.is_running(CallKind::Tips) {
            frame.render_widget(
                Paragraph::new(Line::styled(
                    "Generating tips…",
                    Style::default().fg(Color::DarkGray),
                )),
                Rect::new(inner.x, y, inner.width, 1),
            );
        } else {
            if let Some(warning) = &self.warning {
                frame.render_widget(
                    Paragraph::new(Line::styled(warning.as_str(), Style::default().fg(Color::Yellow))),
                    Rect::new(inner.x, y, inner.width, 1),
                );
                y += 1;
            }
            for tip in &self.tips {
                if y + 2 > inner.y + inner.height.saturating_sub(4) {
                    break;
                }
                let title = Line::from(vec![
                    Span::raw(format!("{} ", category_glyph(tip.category))),
                    Span::styled(
                        tip.title.as_str(),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                ]);
                frame.render_widget(Paragraph::new(title), Rect::new(inner.x, y, inner.width, 1));
                y += 1;
                let body_area = Rect::new(inner.x + 2, y, inner.width.saturating_sub(2), 2);
                frame.render_widget(
                    Paragraph::new(tip.tip.as_str()).wrap(Wrap { trim: true }),
                    body_area,
                );
                y += 2;
            }
        }

        let question_y = inner.y + inner.height.saturating_sub(4);
        render_input_line(
            frame,
            Rect::new(inner.x, question_y, inner.width, 1),
            "Ask",
            &self.question,
            true,
            false,
        );

        let answer_area = Rect::new(inner.x, question_y + 1, inner.width, 2);
        if tui.calls.is_running(CallKind::Answer) {
            frame.render_widget(
                Paragraph::new(Line::styled("Thinking…", Style::default().fg(Color::DarkGray))),
                answer_area,
            );
        } else if let Some(answer) = &self.answer {
            frame.render_widget(
                Paragraph::new(answer.as_str()).wrap(Wrap { trim: true }),
                answer_area,
            );
        }

        let hints_area = Rect::new(inner.x, inner.y + inner.height.saturating_sub(1), inner.width, 1);
        render_hints(
            frame,
            hints_area,
            &[
                InputHint { key: "enter", action: "ask" },
                InputHint { key: "esc", action: "close" },
            ],
        );
    }
}

fn category_glyph(category: TipCategory) -> &'static str {
    match category {
        TipCategory::Segregation => "♻",
        TipCategory::Composting => "🌱",
        TipCategory::ReduceReuse => "🧴",
    }
}
