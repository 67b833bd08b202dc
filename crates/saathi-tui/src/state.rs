//! Application state.
//!
//! Split into `tui` (everything the reducer and renderers read) and
//! `overlay` (the active modal, if any) so overlay key handlers can borrow
//! the overlay mutably while reading the rest of the state.

use saathi_core::auth::Identity;
use saathi_core::config::Config;

use crate::common::Calls;
use crate::overlays::Overlay;
use crate::views::View;

/// Session as the UI sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated(Identity),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Authenticated(identity) => Some(identity),
            SessionState::Unauthenticated => None,
        }
    }
}

/// State read by the reducer and renderers.
pub struct TuiState {
    pub config: Config,
    pub should_quit: bool,
    pub session: SessionState,
    pub view: View,
    /// Cursor into [`View::MENU`].
    pub menu_cursor: usize,
    pub calls: Calls,
    /// One-line status message, replaced on the next notice.
    pub notice: Option<String>,
    pub spinner_frame: usize,
}

/// Full application state.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(config: Config, start_view: View) -> Self {
        Self {
            tui: TuiState {
                config,
                should_quit: false,
                session: SessionState::Unauthenticated,
                view: start_view,
                menu_cursor: View::MENU
                    .iter()
                    .position(|v| *v == start_view)
                    .unwrap_or(0),
                calls: Calls::default(),
                notice: None,
                spinner_frame: 0,
            },
            overlay: None,
        }
    }
}
