//! Account-creation overlay.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use saathi_core::auth::{AccountType, Profile};

use crate::common::CallKind;
use crate::effects::UiEffect;
use crate::overlays::render_utils::{
    InputHint, calculate_overlay_area, render_hints, render_input_line, render_overlay_container,
};
use crate::overlays::{OverlayRequest, OverlayUpdate};
use crate::state::TuiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SignupField {
    FirstName,
    LastName,
    Email,
    Phone,
    AccountType,
    Organization,
    Secret,
    Confirm,
    Terms,
}

const FIELD_ORDER: [SignupField; 9] = [
    SignupField::FirstName,
    SignupField::LastName,
    SignupField::Email,
    SignupField::Phone,
    SignupField::AccountType,
    SignupField::Organization,
    SignupField::Secret,
    SignupField::Confirm,
    SignupField::Terms,
];

/// Account-creation overlay state.
#[derive(Debug)]
pub struct SignupState {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    organization: String,
    secret: String,
    confirm: String,
    account_type: AccountType,
    terms_accepted: bool,
    focus: usize,
    pub error: Option<String>,
}

impl SignupState {
    pub fn open() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            organization: String::new(),
            secret: String::new(),
            confirm: String::new(),
            account_type: AccountType::Citizen,
            terms_accepted: false,
            focus: 0,
            error: None,
        }
    }

    fn focused(&self) -> SignupField {
        FIELD_ORDER[self.focus]
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('l') {
                return OverlayUpdate::open(OverlayRequest::Login);
            }
            return OverlayUpdate::stay();
        }

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % FIELD_ORDER.len();
                OverlayUpdate::stay()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + FIELD_ORDER.len() - 1) % FIELD_ORDER.len();
                OverlayUpdate::stay()
            }
            KeyCode::Enter => self.submit(tui),
            KeyCode::Char(' ') => {
                match self.focused() {
                    SignupField::AccountType => {
                        self.account_type = match self.account_type {
                            AccountType::Citizen => AccountType::Municipality,
                            AccountType::Municipality => AccountType::Citizen,
                        };
                    }
                    SignupField::Terms => self.terms_accepted = !self.terms_accepted,
                    _ => {
                        if let Some(field) = self.focused_text_mut() {
                            field.push(' ');
                        }
                    }
                }
                OverlayUpdate::stay()
            }
            KeyCode::Backspace => {
                if let Some(field) = self.focused_text_mut() {
                    field.pop();
                }
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.focused_text_mut() {
                    field.push(c);
                }
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focused() {
            SignupField::FirstName => Some(&mut self.first_name),
            SignupField::LastName => Some(&mut self.last_name),
            SignupField::Email => Some(&mut self.email),
            SignupField::Phone => Some(&mut self.phone),
            SignupField::Organization => Some(&mut self.organization),
            SignupField::Secret => Some(&mut self.secret),
            SignupField::Confirm => Some(&mut self.confirm),
            SignupField::AccountType | SignupField::Terms => None,
        }
    }

    fn submit(&mut self, tui: &TuiState) -> OverlayUpdate {
        if tui.calls.is_running(CallKind::Signup) {
            return OverlayUpdate::stay();
        }
        self.error = None;
        if let Err(message) = self.validate() {
            self.error = Some(message);
            return OverlayUpdate::stay();
        }

        let profile = Profile {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            account_type: self.account_type,
            organization: non_empty(&self.organization),
            phone: non_empty(&self.phone),
        };
        OverlayUpdate::stay().with_ui_effects(vec![UiEffect::SubmitSignup {
            identifier: self.email.trim().to_string(),
            secret: self.secret.clone(),
            profile,
        }])
    }

    fn validate(&self) -> Result<(), String> {
        if self.first_name.trim().is_empty()
            || self.last_name.trim().is_empty()
            || self.email.trim().is_empty()
        {
            return Err("Name and email are required.".to_string());
        }
        if self.secret.chars().count() < 6 {
            return Err("Password must be at least 6 characters.".to_string());
        }
        if self.secret != self.confirm {
            return Err("Passwords do not match.".to_string());
        }
        if self.account_type == AccountType::Municipality && self.organization.trim().is_empty() {
            return Err("Organization is required for municipality accounts.".to_string());
        }
        if !self.terms_accepted {
            return Err("You must accept the terms to continue.".to_string());
        }
        Ok(())
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState) {
        let overlay = calculate_overlay_area(area, 56, 16);
        let inner = render_overlay_container(frame, overlay, "Create Account");

        let line = |offset: u16| Rect::new(inner.x, inner.y + offset, inner.width, 1);
        let is = |field: SignupField| self.focused() == field;

        render_input_line(frame, line(0), "First name", &self.first_name, is(SignupField::FirstName), false);
        render_input_line(frame, line(1), "Last name", &self.last_name, is(SignupField::LastName), false);
        render_input_line(frame, line(2), "Email", &self.email, is(SignupField::Email), false);
        render_input_line(frame, line(3), "Phone", &self.phone, is(SignupField::Phone), false);

        let account_label = match self.account_type {
            AccountType::Citizen => "Citizen",
            AccountType::Municipality => "Municipality",
        };
        render_input_line(frame, line(4), "Account type", account_label, is(SignupField::AccountType), false);
        render_input_line(frame, line(5), "Organization", &self.organization, is(SignupField::Organization), false);
        render_input_line(frame, line(6), "Password", &self.secret, is(SignupField::Secret), true);
        render_input_line(frame, line(7), "Confirm", &self.confirm, is(SignupField::Confirm), true);

        let terms = if self.terms_accepted { "[x] I accept the terms" } else { "[ ] I accept the terms" };
        render_input_line(frame, line(8), "Terms", terms, is(SignupField::Terms), false);

        if tui.calls.is_running(CallKind::Signup) {
            frame.render_widget(
                Paragraph::new(Line::styled("Creating account…", Style::default().fg(Color::DarkGray))),
                line(10),
            );
        } else if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(Line::styled(error.as_str(), Style::default().fg(Color::Red))),
                line(10),
            );
        }

        let hints_area = Rect::new(inner.x, inner.y + inner.height.saturating_sub(1), inner.width, 1);
        render_hints(
            frame,
            hints_area,
            &[
                InputHint { key: "tab", action: "next field" },
                InputHint { key: "space", action: "toggle" },
                InputHint { key: "enter", action: "submit" },
                InputHint { key: "^l", action: "sign in" },
                InputHint { key: "esc", action: "close" },
            ],
        );
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_requires_matching_passwords_and_terms() {
        let mut state = SignupState::open();
        state.first_name = "Asha".to_string();
        state.last_name = "Verma".to_string();
        state.email = "asha@example.in".to_string();
        state.secret = "secret123".to_string();
        state.confirm = "secret124".to_string();
        state.terms_accepted = true;
        assert_eq!(state.validate(), Err("Passwords do not match.".to_string()));

        state.confirm = "secret123".to_string();
        state.terms_accepted = false;
        assert!(state.validate().is_err());

        state.terms_accepted = true;
        assert_eq!(state.validate(), Ok(()));
    }

    #[test]
    fn municipality_requires_an_organization() {
        let mut state = SignupState::open();
        state.first_name = "Ravi".to_string();
        state.last_name = "Shah".to_string();
        state.email = "ravi@jmc.gov.in".to_string();
        state.secret = "secret123".to_string();
        state.confirm = "secret123".to_string();
        state.terms_accepted = true;
        state.account_type = AccountType::Municipality;
        assert!(state.validate().is_err());

        state.organization = "Jaipur Municipal Corporation".to_string();
        assert_eq!(state.validate(), Ok(()));
    }
}
