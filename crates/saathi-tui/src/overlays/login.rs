//! Sign-in overlay, with a password-reset mode.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::common::CallKind;
use crate::effects::UiEffect;
use crate::overlays::render_utils::{
    InputHint, calculate_overlay_area, render_hints, render_input_line, render_overlay_container,
};
use crate::overlays::{OverlayRequest, OverlayUpdate};
use crate::state::TuiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMode {
    Credentials,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Identifier,
    Secret,
}

/// Sign-in overlay state.
#[derive(Debug)]
pub struct LoginState {
    pub mode: LoginMode,
    pub identifier: String,
    pub secret: String,
    pub focus: LoginField,
    /// Render the secret in the clear instead of masked.
    pub reveal_secret: bool,
    pub error: Option<String>,
    pub info: Option<String>,
}

impl LoginState {
    pub fn open() -> Self {
        Self {
            mode: LoginMode::Credentials,
            identifier: String::new(),
            secret: String::new(),
            focus: LoginField::Identifier,
            reveal_secret: false,
            error: None,
            info: None,
        }
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                // Switch to account creation.
                KeyCode::Char('s') => return OverlayUpdate::open(OverlayRequest::Signup),
                // Show/hide the password.
                KeyCode::Char('v') => {
                    self.reveal_secret = !self.reveal_secret;
                    return OverlayUpdate::stay();
                }
                // Toggle the password-reset mode.
                KeyCode::Char('r') => {
                    self.mode = match self.mode {
                        LoginMode::Credentials => LoginMode::Reset,
                        LoginMode::Reset => LoginMode::Credentials,
                    };
                    self.focus = LoginField::Identifier;
                    self.error = None;
                    self.info = None;
                    return OverlayUpdate::stay();
                }
                _ => return OverlayUpdate::stay(),
            }
        }

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                if self.mode == LoginMode::Credentials {
                    self.focus = match self.focus {
                        LoginField::Identifier => LoginField::Secret,
                        LoginField::Secret => LoginField::Identifier,
                    };
                }
                OverlayUpdate::stay()
            }
            KeyCode::Enter => self.submit(tui),
            KeyCode::Backspace => {
                self.focused_field_mut().pop();
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) => {
                self.focused_field_mut().push(c);
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    fn submit(&mut self, tui: &TuiState) -> OverlayUpdate {
        self.error = None;
        self.info = None;
        match self.mode {
            LoginMode::Credentials => {
                if tui.calls.is_running(CallKind::Login) {
                    return OverlayUpdate::stay();
                }
                if self.identifier.trim().is_empty() || self.secret.is_empty() {
                    self.error = Some("Enter your email and password.".to_string());
                    return OverlayUpdate::stay();
                }
                OverlayUpdate::stay().with_ui_effects(vec![UiEffect::SubmitLogin {
                    identifier: self.identifier.trim().to_string(),
                    secret: self.secret.clone(),
                }])
            }
            LoginMode::Reset => {
                if tui.calls.is_running(CallKind::Reset) {
                    return OverlayUpdate::stay();
                }
                if self.identifier.trim().is_empty() {
                    self.error = Some("Enter your email address.".to_string());
                    return OverlayUpdate::stay();
                }
                OverlayUpdate::stay().with_ui_effects(vec![UiEffect::SubmitReset {
                    identifier: self.identifier.trim().to_string(),
                }])
            }
        }
    }

    fn focused_field_mut(&mut self) -> &mut String {
        match (self.mode, self.focus) {
            (LoginMode::Reset, _) | (_, LoginField::Identifier) => &mut self.identifier,
            (_, LoginField::Secret) => &mut self.secret,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState) {
        let overlay = calculate_overlay_area(area, 52, 10);
        let title = match self.mode {
            LoginMode::Credentials => "Sign In",
            LoginMode::Reset => "Reset Password",
        };
        let inner = render_overlay_container(frame, overlay, title);

        let mut y = inner.y;
        let line = |y: u16| Rect::new(inner.x, y, inner.width, 1);

        render_input_line(
            frame,
            line(y),
            "Email",
            &self.identifier,
            self.focus == LoginField::Identifier || self.mode == LoginMode::Reset,
            false,
        );
        y += 1;
        if self.mode == LoginMode::Credentials {
            render_input_line(
                frame,
                line(y),
                "Password",
                &self.secret,
                self.focus == LoginField::Secret,
                !self.reveal_secret,
            );
            y += 1;
        }
        y += 1;

        let busy = tui.calls.is_running(CallKind::Login) || tui.calls.is_running(CallKind::Reset);
        let mut messages: Vec<Line> = Vec::new();
        if busy {
            messages.push(Line::styled("…", Style::default().fg(Color::DarkGray)));
        }
        if let Some(error) = &self.error {
            messages.push(Line::styled(error.as_str(), Style::default().fg(Color::Red)));
        }
        if let Some(info) = &self.info {
            messages.push(Line::styled(info.as_str(), Style::default().fg(Color::Green)));
        }
        for message in messages {
            frame.render_widget(Paragraph::new(message), line(y));
            y += 1;
        }

        let hints_area = Rect::new(inner.x, inner.y + inner.height.saturating_sub(1), inner.width, 1);
        render_hints(
            frame,
            hints_area,
            &[
                InputHint { key: "enter", action: "submit" },
                InputHint { key: "^s", action: "sign up" },
                InputHint { key: "^r", action: "reset" },
                InputHint { key: "^v", action: "show" },
                InputHint { key: "esc", action: "close" },
            ],
        );
    }
}
