//! Pure reducer: `(state, event) -> effects`.
//!
//! All session and view transitions happen here; the runtime executes the
//! returned effects and feeds results back as events.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use saathi_core::assistant::{CONNECTION_ERROR_ANSWER, FALLBACK_WARNING, fallback_tips};

use crate::common::CallKind;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::router::{self, NavOutcome};
use crate::overlays::{Overlay, OverlayRequest, OverlayTransition};
use crate::state::AppState;
use crate::views::View;

pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            if app.tui.calls.any_running() {
                app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            }
            Vec::new()
        }
        UiEvent::Terminal(terminal_event) => handle_terminal(app, &terminal_event),
        UiEvent::CallStarted(kind) => {
            app.tui.calls.started(kind);
            Vec::new()
        }
        UiEvent::LoginResult(result) => {
            app.tui.calls.finished(CallKind::Login);
            match result {
                Ok(identity) => {
                    router::login_succeeded(&mut app.tui, identity);
                    app.overlay = None;
                    app.tui.notice = Some("Signed in.".to_string());
                }
                Err(error) => {
                    tracing::warn!(kind = ?error.kind, "sign-in failed");
                    if let Some(login) = app.overlay.as_mut().and_then(Overlay::as_login_mut) {
                        login.error = Some(error.user_message().to_string());
                    } else {
                        app.tui.notice = Some(error.user_message().to_string());
                    }
                }
            }
            Vec::new()
        }
        UiEvent::SignupResult(result) => {
            app.tui.calls.finished(CallKind::Signup);
            match result {
                Ok(identity) => {
                    router::signup_succeeded(&mut app.tui, identity);
                    app.overlay = None;
                    app.tui.notice = Some("Welcome to Swachh Saathi!".to_string());
                }
                Err(error) => {
                    tracing::warn!(kind = ?error.kind, "signup failed");
                    if let Some(signup) = app.overlay.as_mut().and_then(Overlay::as_signup_mut) {
                        signup.error = Some(error.user_message().to_string());
                    } else {
                        app.tui.notice = Some(error.user_message().to_string());
                    }
                }
            }
            Vec::new()
        }
        UiEvent::LogoutResult(result) => {
            app.tui.calls.finished(CallKind::Logout);
            match result {
                Ok(()) => {
                    router::logout_succeeded(&mut app.tui);
                    app.tui.notice = Some("Signed out.".to_string());
                }
                Err(error) => {
                    // Session stays as it was; the provider did not end it.
                    tracing::warn!(kind = ?error.kind, "sign-out failed");
                    app.tui.notice = Some(error.user_message().to_string());
                }
            }
            Vec::new()
        }
        UiEvent::ResetResult(result) => {
            app.tui.calls.finished(CallKind::Reset);
            if let Some(login) = app.overlay.as_mut().and_then(Overlay::as_login_mut) {
                match result {
                    Ok(()) => {
                        login.info =
                            Some("Password reset email sent. Check your inbox.".to_string());
                    }
                    Err(error) => login.error = Some(error.user_message().to_string()),
                }
            }
            Vec::new()
        }
        UiEvent::SessionChanged(identity) => {
            let opened = identity.is_some();
            router::session_changed(&mut app.tui, identity);
            // A session opening makes a pending login/signup prompt moot.
            if opened && matches!(app.overlay, Some(Overlay::Login(_) | Overlay::Signup(_))) {
                app.overlay = None;
            }
            Vec::new()
        }
        UiEvent::TipsResult(result) => {
            app.tui.calls.finished(CallKind::Tips);
            if let Some(assistant) = app.overlay.as_mut().and_then(Overlay::as_assistant_mut) {
                match result {
                    Ok(tips) => assistant.tips = tips,
                    Err(error) => {
                        tracing::warn!(kind = ?error.kind, "tip generation failed");
                        assistant.tips = fallback_tips();
                        assistant.warning = Some(FALLBACK_WARNING.to_string());
                    }
                }
            }
            Vec::new()
        }
        UiEvent::AnswerResult(result) => {
            app.tui.calls.finished(CallKind::Answer);
            if let Some(assistant) = app.overlay.as_mut().and_then(Overlay::as_assistant_mut) {
                assistant.answer = Some(match result {
                    Ok(answer) => answer,
                    Err(error) => {
                        tracing::warn!(kind = ?error.kind, "question failed");
                        CONNECTION_ERROR_ANSWER.to_string()
                    }
                });
            }
            Vec::new()
        }
    }
}

fn handle_terminal(app: &mut AppState, event: &Event) -> Vec<UiEffect> {
    let Event::Key(key) = event else {
        return Vec::new();
    };
    if key.kind != KeyEventKind::Press {
        return Vec::new();
    }

    if app.overlay.is_some() {
        return handle_overlay_key(app, *key);
    }
    handle_global_key(app, *key)
}

fn handle_overlay_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let Some(overlay) = app.overlay.as_mut() else {
        return Vec::new();
    };
    let update = overlay.handle_key(&app.tui, key);
    let mut effects = update.effects;
    match update.transition {
        OverlayTransition::Stay => {}
        OverlayTransition::Close => app.overlay = None,
        OverlayTransition::Open(request) => effects.extend(open_overlay(app, request)),
    }
    effects
}

fn handle_global_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('q') => vec![UiEffect::Quit],
        KeyCode::Left => {
            app.tui.menu_cursor =
                (app.tui.menu_cursor + View::MENU.len() - 1) % View::MENU.len();
            Vec::new()
        }
        KeyCode::Right => {
            app.tui.menu_cursor = (app.tui.menu_cursor + 1) % View::MENU.len();
            Vec::new()
        }
        KeyCode::Enter => {
            let target = View::MENU[app.tui.menu_cursor];
            navigate_to(app, target)
        }
        // Direct navigation, one digit per view.
        KeyCode::Char(c @ '1'..='7') => {
            let view = match c {
                '1' => View::Home,
                '2' => View::Timing,
                '3' => View::Route,
                '4' => View::Feedback,
                '5' => View::Share,
                '6' => View::Terms,
                _ => View::Privacy,
            };
            navigate_to(app, view)
        }
        KeyCode::Char('a') => open_overlay(app, OverlayRequest::Assistant),
        KeyCode::Char('l') => {
            if app.tui.session.is_authenticated() {
                if app.tui.calls.is_running(CallKind::Logout) {
                    Vec::new()
                } else {
                    vec![UiEffect::SubmitLogout]
                }
            } else {
                open_overlay(app, OverlayRequest::Login)
            }
        }
        KeyCode::Char('s') => {
            if app.tui.session.is_authenticated() {
                Vec::new()
            } else {
                open_overlay(app, OverlayRequest::Signup)
            }
        }
        _ => Vec::new(),
    }
}

/// Navigates to `view`, opening the login prompt when the router requires
/// a session for it.
pub fn navigate_to(app: &mut AppState, view: View) -> Vec<UiEffect> {
    match router::navigate(&mut app.tui, view) {
        NavOutcome::Shown(_) | NavOutcome::ResetToHome => Vec::new(),
        NavOutcome::LoginRequired(_) => open_overlay(app, OverlayRequest::Login),
    }
}

fn open_overlay(app: &mut AppState, request: OverlayRequest) -> Vec<UiEffect> {
    let (overlay, effects) = Overlay::from_request(request);
    app.overlay = Some(overlay);
    effects
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use saathi_core::assistant::{CompletionError, TipCategory};
    use saathi_core::auth::{AuthError, AuthErrorKind, Identity};
    use saathi_core::config::Config;

    use super::*;
    use crate::state::SessionState;

    fn app() -> AppState {
        AppState::new(Config::default(), View::Home)
    }

    fn authed_app() -> AppState {
        let mut app = app();
        app.tui.session = SessionState::Authenticated(test_identity());
        app
    }

    fn test_identity() -> Identity {
        Identity {
            uid: "uid-1".to_string(),
            email: "asha@example.in".to_string(),
            display_name: None,
        }
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn wrong_secret() -> AuthError {
        AuthError {
            kind: AuthErrorKind::WrongSecret,
            message: "INVALID_PASSWORD".to_string(),
            details: None,
        }
    }

    #[test]
    fn q_quits() {
        let mut app = app();
        let effects = update(&mut app, key(KeyCode::Char('q')));
        assert!(matches!(effects[..], [UiEffect::Quit]));
    }

    #[test]
    fn gated_menu_entry_opens_login_prompt() {
        let mut app = app();
        app.tui.menu_cursor = 1; // Timing
        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert!(matches!(app.overlay, Some(Overlay::Login(_))));
        assert_eq!(app.tui.view, View::Timing, "requested view preserved");
    }

    #[test]
    fn login_success_closes_overlay_and_goes_home() {
        let mut app = app();
        navigate_to(&mut app, View::Route);
        app.tui.calls.started(CallKind::Login);

        update(&mut app, UiEvent::LoginResult(Ok(test_identity())));

        assert!(app.overlay.is_none());
        assert!(app.tui.session.is_authenticated());
        assert_eq!(app.tui.view, View::Home);
        assert!(!app.tui.calls.is_running(CallKind::Login));
    }

    #[test]
    fn login_failure_surfaces_error_in_overlay() {
        let mut app = app();
        navigate_to(&mut app, View::Route);
        app.tui.calls.started(CallKind::Login);

        update(&mut app, UiEvent::LoginResult(Err(wrong_secret())));

        let Some(Overlay::Login(login)) = &app.overlay else {
            panic!("login overlay should stay open");
        };
        assert_eq!(
            login.error.as_deref(),
            Some("Incorrect password. Please try again.")
        );
        assert!(!app.tui.session.is_authenticated());
        assert!(!app.tui.calls.is_running(CallKind::Login));
    }

    #[test]
    fn logout_failure_keeps_the_session() {
        let mut app = authed_app();
        app.tui.calls.started(CallKind::Logout);

        update(
            &mut app,
            UiEvent::LogoutResult(Err(AuthError {
                kind: AuthErrorKind::Network,
                message: "connection refused".to_string(),
                details: None,
            })),
        );

        assert!(app.tui.session.is_authenticated());
        assert!(app.tui.notice.is_some());
    }

    #[test]
    fn logout_success_closes_session_and_goes_home() {
        let mut app = authed_app();
        navigate_to(&mut app, View::Timing);
        app.tui.calls.started(CallKind::Logout);

        update(&mut app, UiEvent::LogoutResult(Ok(())));

        assert!(!app.tui.session.is_authenticated());
        assert_eq!(app.tui.view, View::Home);
    }

    #[test]
    fn session_notification_applies_unconditionally() {
        let mut app = app();
        update(&mut app, UiEvent::SessionChanged(Some(test_identity())));
        assert!(app.tui.session.is_authenticated());

        update(&mut app, UiEvent::SessionChanged(None));
        assert!(!app.tui.session.is_authenticated());
    }

    #[test]
    fn session_opening_dismisses_login_prompt() {
        let mut app = app();
        navigate_to(&mut app, View::Timing);
        assert!(app.overlay.is_some());

        update(&mut app, UiEvent::SessionChanged(Some(test_identity())));
        assert!(app.overlay.is_none());
    }

    #[test]
    fn assistant_opens_with_a_tips_fetch() {
        let mut app = app();
        let effects = update(&mut app, key(KeyCode::Char('a')));
        assert!(matches!(effects[..], [UiEffect::FetchTips]));
        assert!(matches!(app.overlay, Some(Overlay::Assistant(_))));
    }

    #[test]
    fn tips_failure_falls_back_with_warning() {
        let mut app = app();
        update(&mut app, key(KeyCode::Char('a')));
        app.tui.calls.started(CallKind::Tips);

        update(
            &mut app,
            UiEvent::TipsResult(Err(CompletionError::parse("bad reply"))),
        );

        let Some(Overlay::Assistant(assistant)) = &app.overlay else {
            panic!("assistant overlay should stay open");
        };
        assert_eq!(assistant.tips.len(), 3);
        assert_eq!(assistant.tips[0].category, TipCategory::Segregation);
        assert_eq!(assistant.warning.as_deref(), Some(FALLBACK_WARNING));
    }

    #[test]
    fn answer_failure_substitutes_connection_error() {
        let mut app = app();
        update(&mut app, key(KeyCode::Char('a')));
        app.tui.calls.started(CallKind::Answer);

        update(
            &mut app,
            UiEvent::AnswerResult(Err(CompletionError::parse("bad reply"))),
        );

        let Some(Overlay::Assistant(assistant)) = &app.overlay else {
            panic!("assistant overlay should stay open");
        };
        assert_eq!(assistant.answer.as_deref(), Some(CONNECTION_ERROR_ANSWER));
    }

    #[test]
    fn login_submit_is_rejected_while_in_flight() {
        let mut app = app();
        update(&mut app, key(KeyCode::Char('l')));
        {
            let Some(Overlay::Login(login)) = app.overlay.as_mut() else {
                panic!("login overlay expected");
            };
            login.identifier = "asha@example.in".to_string();
            login.secret = "secret123".to_string();
        }

        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(matches!(effects[..], [UiEffect::SubmitLogin { .. }]));

        app.tui.calls.started(CallKind::Login);
        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(effects.is_empty(), "second submission rejected");
    }

    #[test]
    fn digit_navigation_covers_screenless_views() {
        let mut authed = authed_app();
        navigate_to(&mut authed, View::Route);

        // '4' is feedback, which has no screen of its own.
        update(&mut authed, key(KeyCode::Char('4')));
        assert_eq!(authed.tui.view, View::Home);
        assert!(authed.overlay.is_none());

        let mut anon = app();
        update(&mut anon, key(KeyCode::Char('6')));
        assert!(matches!(anon.overlay, Some(Overlay::Login(_))));
        assert_eq!(anon.tui.view, View::Terms);
    }

    #[test]
    fn l_submits_logout_when_authenticated() {
        let mut app = authed_app();
        let effects = update(&mut app, key(KeyCode::Char('l')));
        assert!(matches!(effects[..], [UiEffect::SubmitLogout]));

        app.tui.calls.started(CallKind::Logout);
        let effects = update(&mut app, key(KeyCode::Char('l')));
        assert!(effects.is_empty());
    }
}
