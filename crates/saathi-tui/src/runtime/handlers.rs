//! Effect handlers: pure async functions returning the result event.

use std::sync::Arc;

use saathi_core::assistant::CompletionClient;
use saathi_core::auth::{AuthClient, Profile};

use crate::events::UiEvent;

pub async fn login(client: Arc<AuthClient>, identifier: String, secret: String) -> UiEvent {
    UiEvent::LoginResult(client.verify_credentials(&identifier, &secret).await)
}

pub async fn signup(
    client: Arc<AuthClient>,
    identifier: String,
    secret: String,
    profile: Profile,
) -> UiEvent {
    UiEvent::SignupResult(client.create_account(&identifier, &secret, &profile).await)
}

pub async fn logout(client: Arc<AuthClient>) -> UiEvent {
    UiEvent::LogoutResult(client.sign_out().await)
}

pub async fn reset(client: Arc<AuthClient>, identifier: String) -> UiEvent {
    UiEvent::ResetResult(client.request_secret_reset(&identifier).await)
}

pub async fn fetch_tips(client: Arc<CompletionClient>) -> UiEvent {
    UiEvent::TipsResult(client.generate_tips().await)
}

pub async fn ask(client: Arc<CompletionClient>, question: String) -> UiEvent {
    UiEvent::AnswerResult(client.answer_question(&question).await)
}
