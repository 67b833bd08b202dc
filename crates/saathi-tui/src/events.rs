//! Events fed to the reducer.

use saathi_core::assistant::{CompletionError, Tip};
use saathi_core::auth::{AuthError, Identity};

use crate::common::CallKind;

/// Everything that can happen to the UI.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick; drives the spinner and caps the render rate.
    Tick,
    /// Raw terminal input.
    Terminal(crossterm::event::Event),
    /// A remote call was spawned.
    CallStarted(CallKind),
    LoginResult(Result<Identity, AuthError>),
    SignupResult(Result<Identity, AuthError>),
    LogoutResult(Result<(), AuthError>),
    ResetResult(Result<(), AuthError>),
    /// The identity provider reported a session change. Authoritative:
    /// applied unconditionally, regardless of UI state.
    SessionChanged(Option<Identity>),
    TipsResult(Result<Vec<Tip>, CompletionError>),
    AnswerResult(Result<String, CompletionError>),
}
