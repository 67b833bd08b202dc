//! In-flight tracking for remote calls.
//!
//! Each call kind has a single boolean slot: a second submission while the
//! first is in flight is rejected at the input layer, and nothing is ever
//! cancelled mid-flight.

/// The remote calls the UI can have outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Login,
    Signup,
    Logout,
    Reset,
    Tips,
    Answer,
}

/// Per-kind in-flight flags.
#[derive(Debug, Default, Clone, Copy)]
pub struct Calls {
    pub login: bool,
    pub signup: bool,
    pub logout: bool,
    pub reset: bool,
    pub tips: bool,
    pub answer: bool,
}

impl Calls {
    pub fn started(&mut self, kind: CallKind) {
        *self.slot(kind) = true;
    }

    pub fn finished(&mut self, kind: CallKind) {
        *self.slot(kind) = false;
    }

    pub fn is_running(&self, kind: CallKind) -> bool {
        match kind {
            CallKind::Login => self.login,
            CallKind::Signup => self.signup,
            CallKind::Logout => self.logout,
            CallKind::Reset => self.reset,
            CallKind::Tips => self.tips,
            CallKind::Answer => self.answer,
        }
    }

    pub fn any_running(&self) -> bool {
        self.login || self.signup || self.logout || self.reset || self.tips || self.answer
    }

    fn slot(&mut self, kind: CallKind) -> &mut bool {
        match kind {
            CallKind::Login => &mut self.login,
            CallKind::Signup => &mut self.signup,
            CallKind::Logout => &mut self.logout,
            CallKind::Reset => &mut self.reset,
            CallKind::Tips => &mut self.tips,
            CallKind::Answer => &mut self.answer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_track_lifecycle() {
        let mut calls = Calls::default();
        assert!(!calls.any_running());

        calls.started(CallKind::Tips);
        assert!(calls.is_running(CallKind::Tips));
        assert!(!calls.is_running(CallKind::Login));
        assert!(calls.any_running());

        calls.finished(CallKind::Tips);
        assert!(!calls.any_running());
    }
}
