//! Overlay modules for the TUI.
//!
//! Overlays are modal UI components that temporarily take over keyboard
//! input. Each overlay owns its state, key handler, and render function.

pub mod assistant;
pub mod login;
pub mod render_utils;
pub mod signup;

pub use assistant::AssistantState;
use crossterm::event::KeyEvent;
pub use login::LoginState;
use ratatui::Frame;
use ratatui::layout::Rect;
pub use signup::SignupState;

use crate::effects::UiEffect;
use crate::state::TuiState;

/// Requests to open a new overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayRequest {
    Login,
    Signup,
    Assistant,
}

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
    Open(OverlayRequest),
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            effects: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    pub fn open(request: OverlayRequest) -> Self {
        Self::new(OverlayTransition::Open(request))
    }

    #[must_use]
    pub fn with_ui_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

/// The active modal.
#[derive(Debug)]
pub enum Overlay {
    Login(LoginState),
    Signup(SignupState),
    Assistant(AssistantState),
}

impl Overlay {
    /// Builds the overlay for a request, returning any effects opening it
    /// requires.
    pub fn from_request(request: OverlayRequest) -> (Self, Vec<UiEffect>) {
        match request {
            OverlayRequest::Login => (Overlay::Login(LoginState::open()), Vec::new()),
            OverlayRequest::Signup => (Overlay::Signup(SignupState::open()), Vec::new()),
            OverlayRequest::Assistant => {
                let (state, effects) = AssistantState::open();
                (Overlay::Assistant(state), effects)
            }
        }
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::Login(s) => s.handle_key(tui, key),
            Overlay::Signup(s) => s.handle_key(tui, key),
            Overlay::Assistant(s) => s.handle_key(tui, key),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState) {
        match self {
            Overlay::Login(s) => s.render(frame, area, tui),
            Overlay::Signup(s) => s.render(frame, area, tui),
            Overlay::Assistant(s) => s.render(frame, area, tui),
        }
    }

    pub fn as_login_mut(&mut self) -> Option<&mut LoginState> {
        match self {
            Overlay::Login(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_signup_mut(&mut self) -> Option<&mut SignupState> {
        match self {
            Overlay::Signup(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_assistant_mut(&mut self) -> Option<&mut AssistantState> {
        match self {
            Overlay::Assistant(s) => Some(s),
            _ => None,
        }
    }
}
