//! Effects returned by the reducer, executed by the runtime.

use saathi_core::auth::Profile;

/// Side effects the reducer requests.
#[derive(Debug)]
pub enum UiEffect {
    Quit,
    SubmitLogin {
        identifier: String,
        secret: String,
    },
    SubmitSignup {
        identifier: String,
        secret: String,
        profile: Profile,
    },
    SubmitLogout,
    SubmitReset {
        identifier: String,
    },
    FetchTips,
    AskAssistant {
        question: String,
    },
}
