//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! This is the Elm-runtime boundary: all side effects happen here. The
//! reducer stays pure and produces effects; this module executes them.
//!
//! Async results arrive through an inbox channel: handlers send `UiEvent`s
//! to `inbox_tx` and the loop drains `inbox_rx` each frame. Session changes
//! from the identity provider arrive on a separate watch channel and are
//! folded into the same event stream.

mod handlers;

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use saathi_core::assistant::CompletionClient;
use saathi_core::auth::session::{SessionValidation, spawn_session_validation};
use saathi_core::auth::{AuthClient, Identity};
use saathi_core::config::Config;
use tokio::sync::{mpsc, watch};

use crate::common::CallKind;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::views::View;
use crate::{render, terminal, update};

/// Tick cadence while a call is in flight (drives the spinner).
const BUSY_TICK: Duration = Duration::from_millis(100);
/// Tick cadence when idle.
const IDLE_TICK: Duration = Duration::from_millis(250);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop or panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    auth: Arc<AuthClient>,
    completion: Arc<CompletionClient>,
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    session_rx: watch::Receiver<Option<Identity>>,
    _session_validation: SessionValidation,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates the runtime. Must be called inside a tokio runtime context;
    /// the session revalidation task is spawned here.
    pub fn new(config: Config, start_view: View) -> Result<Self> {
        let auth = Arc::new(AuthClient::new(&config.identity)?);
        let completion = Arc::new(CompletionClient::new(&config.assistant)?);
        let session_rx = auth.subscribe_session_changes();
        let session_validation = spawn_session_validation(
            Arc::clone(&auth),
            Duration::from_secs(config.identity.session_poll_secs),
        );

        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("failed to set up terminal")?;

        let state = AppState::new(config, start_view);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            auth,
            completion,
            inbox_tx,
            inbox_rx,
            session_rx,
            _session_validation: session_validation,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until quit.
    pub fn run(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.tui.should_quit {
            let events = self.collect_events()?;

            for event in events {
                let marks_dirty = matches!(&event, UiEvent::Tick | UiEvent::Terminal(_));
                let effects = update::update(&mut self.state, event);
                if marks_dirty {
                    dirty = true;
                }
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Drain async results first.
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Fold provider session changes into the event stream.
        if self.session_rx.has_changed().unwrap_or(false) {
            let identity = self.session_rx.borrow_and_update().clone();
            events.push(UiEvent::SessionChanged(identity));
        }

        let tick_interval = if self.state.tui.calls.any_running() {
            BUSY_TICK
        } else {
            IDLE_TICK
        };

        // Block until the next tick is due unless there is work already.
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }
            UiEffect::SubmitLogin { identifier, secret } => {
                let client = Arc::clone(&self.auth);
                self.spawn_call(CallKind::Login, move || {
                    handlers::login(client, identifier, secret)
                });
            }
            UiEffect::SubmitSignup {
                identifier,
                secret,
                profile,
            } => {
                let client = Arc::clone(&self.auth);
                self.spawn_call(CallKind::Signup, move || {
                    handlers::signup(client, identifier, secret, profile)
                });
            }
            UiEffect::SubmitLogout => {
                let client = Arc::clone(&self.auth);
                self.spawn_call(CallKind::Logout, move || handlers::logout(client));
            }
            UiEffect::SubmitReset { identifier } => {
                let client = Arc::clone(&self.auth);
                self.spawn_call(CallKind::Reset, move || handlers::reset(client, identifier));
            }
            UiEffect::FetchTips => {
                let client = Arc::clone(&self.completion);
                self.spawn_call(CallKind::Tips, move || handlers::fetch_tips(client));
            }
            UiEffect::AskAssistant { question } => {
                let client = Arc::clone(&self.completion);
                self.spawn_call(CallKind::Answer, move || handlers::ask(client, question));
            }
        }
    }

    /// Spawns an async call: a `CallStarted` event lands immediately, the
    /// result event lands when the handler finishes.
    fn spawn_call<F, Fut>(&self, kind: CallKind, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let _ = tx.send(UiEvent::CallStarted(kind));
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
