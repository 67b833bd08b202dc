//! View labels and their access rules.

/// A navigable view of the client.
///
/// `Home` is the public landing page. Everything else requires an
/// authenticated session. Only `Home`, `Timing`, and `Route` have a content
/// screen; the remaining labels exist as link targets and fall back to the
/// landing page when visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Timing,
    Route,
    Feedback,
    Share,
    Terms,
    Privacy,
}

impl View {
    /// Views reachable from the menu bar.
    pub const MENU: [View; 3] = [View::Home, View::Timing, View::Route];

    /// Parses a view label. Unknown labels fall back to `Home`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "home" => View::Home,
            "timing" => View::Timing,
            "route" => View::Route,
            "feedback" => View::Feedback,
            "share" => View::Share,
            "terms" => View::Terms,
            "privacy" => View::Privacy,
            other => {
                tracing::debug!(label = other, "unknown view label, using home");
                View::Home
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Home => "home",
            View::Timing => "timing",
            View::Route => "route",
            View::Feedback => "feedback",
            View::Share => "share",
            View::Terms => "terms",
            View::Privacy => "privacy",
        }
    }

    /// Menu-bar title.
    pub fn title(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Timing => "Timing",
            View::Route => "Route",
            View::Feedback => "Feedback",
            View::Share => "Share",
            View::Terms => "Terms",
            View::Privacy => "Privacy",
        }
    }

    /// Whether this view needs an authenticated session.
    pub fn requires_auth(self) -> bool {
        !matches!(self, View::Home)
    }

    /// Whether this view has a dedicated content screen.
    pub fn has_screen(self) -> bool {
        matches!(self, View::Home | View::Timing | View::Route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for view in [
            View::Home,
            View::Timing,
            View::Route,
            View::Feedback,
            View::Share,
            View::Terms,
            View::Privacy,
        ] {
            assert_eq!(View::from_label(view.label()), view);
        }
    }

    #[test]
    fn unknown_label_falls_back_to_home() {
        assert_eq!(View::from_label("dashboard"), View::Home);
        assert_eq!(View::from_label(""), View::Home);
    }

    #[test]
    fn only_home_is_public() {
        assert!(!View::Home.requires_auth());
        assert!(View::Timing.requires_auth());
        assert!(View::Privacy.requires_auth());
    }
}
