//! Background session revalidation.
//!
//! The identity provider's notification channel (`AuthClient::
//! subscribe_session_changes`) already fires on every local login, signup,
//! and sign-out. This module adds the external half: a task that
//! periodically revalidates the held token against the server so that token
//! expiry or a server-side sign-out also flows into the same channel.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::AuthClient;

/// Handle for the background revalidation task.
///
/// Cancels the task on drop; acquiring and dropping this handle is the only
/// way the task starts and stops.
pub struct SessionValidation {
    cancel: CancellationToken,
}

impl Drop for SessionValidation {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Spawns the revalidation loop for `client`.
pub fn spawn_session_validation(
    client: Arc<AuthClient>,
    interval: Duration,
) -> SessionValidation {
    let cancel = CancellationToken::new();
    let task_cancel = cancel.clone();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                () = task_cancel.cancelled() => break,
                () = tokio::time::sleep(interval) => {
                    client.revalidate_session().await;
                }
            }
        }
        tracing::debug!("session revalidation stopped");
    });
    SessionValidation { cancel }
}
