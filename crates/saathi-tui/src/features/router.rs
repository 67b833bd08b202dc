//! Session-gated view routing.
//!
//! The stored view and the session state are independent: navigation records
//! where the user wants to be, and [`resolve`] decides what may actually be
//! drawn. Gated content is therefore impossible to render without a session,
//! even if the session drops while a gated view is stored.

use saathi_core::auth::Identity;

use crate::state::{SessionState, TuiState};
use crate::views::View;

/// What a navigation attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// View stored and its screen may be shown.
    Shown(View),
    /// Authenticated visit to a screenless label; view reset to home.
    ResetToHome,
    /// Unauthenticated visit to a gated view; view stored, login required.
    LoginRequired(View),
}

/// What the content area should draw for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The public landing page.
    Landing,
    /// A gated content screen.
    Content(View),
    /// A gated view is stored but there is no session; draw the landing
    /// page as a backdrop and never the gated content.
    Withheld,
}

/// Records a navigation request and reports what to do about it.
pub fn navigate(tui: &mut TuiState, view: View) -> NavOutcome {
    if view.requires_auth() && !tui.session.is_authenticated() {
        tui.view = view;
        return NavOutcome::LoginRequired(view);
    }
    if !view.has_screen() {
        tui.view = View::Home;
        return NavOutcome::ResetToHome;
    }
    tui.view = view;
    NavOutcome::Shown(view)
}

/// Resolves the stored view against the session.
pub fn resolve(tui: &TuiState) -> Resolution {
    if tui.view == View::Home {
        return Resolution::Landing;
    }
    if !tui.session.is_authenticated() {
        return Resolution::Withheld;
    }
    if tui.view.has_screen() {
        Resolution::Content(tui.view)
    } else {
        Resolution::Landing
    }
}

/// A credential check succeeded: session opens and the view resets to home.
pub fn login_succeeded(tui: &mut TuiState, identity: Identity) {
    tui.session = SessionState::Authenticated(identity);
    tui.view = View::Home;
}

/// Account creation succeeded: same as a login.
pub fn signup_succeeded(tui: &mut TuiState, identity: Identity) {
    login_succeeded(tui, identity);
}

/// A sign-out succeeded: session closes and the view resets to home.
pub fn logout_succeeded(tui: &mut TuiState) {
    tui.session = SessionState::Unauthenticated;
    tui.view = View::Home;
}

/// The provider reported a session change. Applied unconditionally.
pub fn session_changed(tui: &mut TuiState, identity: Option<Identity>) {
    tui.session = match identity {
        Some(identity) => SessionState::Authenticated(identity),
        None => SessionState::Unauthenticated,
    };
}

#[cfg(test)]
mod tests {
    use saathi_core::config::Config;

    use super::*;
    use crate::state::AppState;

    fn test_identity() -> Identity {
        Identity {
            uid: "uid-1".to_string(),
            email: "asha@example.in".to_string(),
            display_name: Some("Asha Verma".to_string()),
        }
    }

    fn unauthenticated() -> TuiState {
        AppState::new(Config::default(), View::Home).tui
    }

    fn authenticated() -> TuiState {
        let mut tui = unauthenticated();
        tui.session = SessionState::Authenticated(test_identity());
        tui
    }

    #[test]
    fn home_is_reachable_without_a_session() {
        let mut tui = unauthenticated();
        assert_eq!(navigate(&mut tui, View::Home), NavOutcome::Shown(View::Home));
        assert_eq!(resolve(&tui), Resolution::Landing);
    }

    #[test]
    fn gated_view_without_session_requires_login_and_keeps_the_view() {
        let mut tui = unauthenticated();
        assert_eq!(
            navigate(&mut tui, View::Timing),
            NavOutcome::LoginRequired(View::Timing)
        );
        assert_eq!(tui.view, View::Timing);
        assert_eq!(resolve(&tui), Resolution::Withheld);
    }

    #[test]
    fn gated_view_with_session_is_shown() {
        let mut tui = authenticated();
        assert_eq!(
            navigate(&mut tui, View::Route),
            NavOutcome::Shown(View::Route)
        );
        assert_eq!(resolve(&tui), Resolution::Content(View::Route));
    }

    #[test]
    fn screenless_views_reset_to_home_when_authenticated() {
        for view in [View::Feedback, View::Share, View::Terms, View::Privacy] {
            let mut tui = authenticated();
            tui.view = View::Route;
            assert_eq!(navigate(&mut tui, view), NavOutcome::ResetToHome);
            assert_eq!(tui.view, View::Home);
        }
    }

    #[test]
    fn screenless_views_still_gate_when_unauthenticated() {
        let mut tui = unauthenticated();
        assert_eq!(
            navigate(&mut tui, View::Terms),
            NavOutcome::LoginRequired(View::Terms)
        );
        assert_eq!(tui.view, View::Terms);
        assert_eq!(resolve(&tui), Resolution::Withheld);
    }

    #[test]
    fn login_opens_session_and_resets_view() {
        let mut tui = unauthenticated();
        navigate(&mut tui, View::Timing);
        login_succeeded(&mut tui, test_identity());
        assert!(tui.session.is_authenticated());
        assert_eq!(tui.view, View::Home);
        assert_eq!(resolve(&tui), Resolution::Landing);
    }

    #[test]
    fn logout_closes_session_and_resets_view() {
        let mut tui = authenticated();
        navigate(&mut tui, View::Timing);
        logout_succeeded(&mut tui);
        assert!(!tui.session.is_authenticated());
        assert_eq!(tui.view, View::Home);
        assert_eq!(resolve(&tui), Resolution::Landing);
    }

    #[test]
    fn notification_sign_out_keeps_the_requested_view() {
        let mut tui = authenticated();
        navigate(&mut tui, View::Timing);
        session_changed(&mut tui, None);
        assert!(!tui.session.is_authenticated());
        assert_eq!(tui.view, View::Timing);
        assert_eq!(resolve(&tui), Resolution::Withheld, "gated content withheld");
    }

    #[test]
    fn provider_notification_is_authoritative() {
        let mut tui = unauthenticated();
        session_changed(&mut tui, Some(test_identity()));
        assert!(tui.session.is_authenticated());

        // A drop arrives even though the UI never asked for one.
        let mut tui = authenticated();
        navigate(&mut tui, View::Route);
        session_changed(&mut tui, None);
        assert!(!tui.session.is_authenticated());
        assert_eq!(resolve(&tui), Resolution::Withheld);
    }

    #[test]
    fn session_drop_never_exposes_gated_content() {
        let mut tui = authenticated();
        navigate(&mut tui, View::Timing);
        assert_eq!(resolve(&tui), Resolution::Content(View::Timing));
        session_changed(&mut tui, None);
        assert_ne!(resolve(&tui), Resolution::Content(View::Timing));
    }
}
