//! Identity service client.
//!
//! REST client for the external identity provider: account creation,
//! credential verification, sign-out, and secret reset. The client also owns
//! the session-change notification channel (see [`session`]): the current
//! identity is published on a `watch` channel whenever it changes, and a
//! background task can revalidate the held token against the server so that
//! expiry or server-side sign-out is reflected without user action.

pub mod session;

use std::fmt;
use std::sync::Mutex;

use anyhow::Result;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::watch;

use crate::config::{IdentityConfig, resolve_api_key, resolve_base_url};

/// Kind of account being registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Citizen,
    Municipality,
}

/// Profile details collected at signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub account_type: AccountType,
    pub organization: Option<String>,
    pub phone: Option<String>,
}

impl Profile {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// An authenticated identity as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

// ============================================================================
// Errors
// ============================================================================

/// Error category for identity operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    IdentifierInUse,
    WeakSecret,
    InvalidIdentifier,
    NotFound,
    WrongSecret,
    DisabledAccount,
    TooManyAttempts,
    Network,
    Unknown,
}

/// Structured error from the identity service with kind and details.
#[derive(Debug, Clone)]
pub struct AuthError {
    /// Error category.
    pub kind: AuthErrorKind,
    /// One-line summary suitable for logs.
    pub message: String,
    /// Optional raw error body.
    pub details: Option<String>,
}

impl AuthError {
    pub fn new(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Classifies an HTTP error response by the provider's error code.
    pub fn from_status(status: u16, body: &str) -> Self {
        let code = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_default();

        // Codes may carry a trailing reason ("WEAK_PASSWORD : ..."), so match
        // on the leading token only.
        let token = code.split([' ', ':']).next().unwrap_or("");
        let kind = match token {
            "EMAIL_EXISTS" => AuthErrorKind::IdentifierInUse,
            "WEAK_PASSWORD" => AuthErrorKind::WeakSecret,
            "INVALID_EMAIL" | "MISSING_EMAIL" => AuthErrorKind::InvalidIdentifier,
            "EMAIL_NOT_FOUND" => AuthErrorKind::NotFound,
            "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => AuthErrorKind::WrongSecret,
            "USER_DISABLED" => AuthErrorKind::DisabledAccount,
            "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthErrorKind::TooManyAttempts,
            _ => AuthErrorKind::Unknown,
        };

        Self {
            kind,
            message: if code.is_empty() {
                format!("HTTP {status}")
            } else {
                format!("HTTP {status}: {code}")
            },
            details: (!body.is_empty()).then(|| body.to_string()),
        }
    }

    /// Classifies a transport-level failure.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        Self::new(AuthErrorKind::Network, err.to_string())
    }

    /// The fixed human-readable message shown to the user for this error.
    pub fn user_message(&self) -> &'static str {
        match self.kind {
            AuthErrorKind::IdentifierInUse => "An account with this email already exists.",
            AuthErrorKind::WeakSecret => "Password is too weak. Use at least 6 characters.",
            AuthErrorKind::InvalidIdentifier => "That email address doesn't look right.",
            AuthErrorKind::NotFound => "No account found with this email.",
            AuthErrorKind::WrongSecret => "Incorrect password. Please try again.",
            AuthErrorKind::DisabledAccount => "This account has been disabled.",
            AuthErrorKind::TooManyAttempts => "Too many attempts. Please try again later.",
            AuthErrorKind::Network => {
                "Network error. Please check your connection and try again."
            }
            AuthErrorKind::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AuthError {}

pub type AuthResult<T> = std::result::Result<T, AuthError>;

// ============================================================================
// Client
// ============================================================================

#[derive(Debug, Deserialize)]
struct CredentialResponse {
    #[serde(rename = "localId")]
    local_id: String,
    email: String,
    #[serde(rename = "idToken")]
    id_token: String,
    #[serde(rename = "displayName")]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
struct LookupUser {
    #[serde(rename = "localId")]
    local_id: String,
    email: String,
    #[serde(rename = "displayName")]
    display_name: Option<String>,
}

/// Identity service client.
///
/// Holds the current session (identity + token) and publishes identity
/// changes on a `watch` channel. All operations take `&self`; the client is
/// shared behind an `Arc`.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    token: Mutex<Option<String>>,
    session_tx: watch::Sender<Option<Identity>>,
}

impl AuthClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    /// Returns an error if no API key is configured.
    pub fn new(config: &IdentityConfig) -> Result<Self> {
        let api_key = resolve_api_key(
            config.api_key.as_deref(),
            "SAATHI_IDENTITY_API_KEY",
            "identity",
        )?;
        let base_url = resolve_base_url(&config.base_url, "SAATHI_IDENTITY_BASE_URL");
        let (session_tx, _) = watch::channel(None);
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
            token: Mutex::new(None),
            session_tx,
        })
    }

    /// Subscribes to session-change notifications.
    ///
    /// The receiver observes the current identity (or `None`) and every
    /// subsequent change: login, signup, sign-out, and background
    /// invalidation. Dropping the receiver tears the subscription down.
    pub fn subscribe_session_changes(&self) -> watch::Receiver<Option<Identity>> {
        self.session_tx.subscribe()
    }

    /// Creates a new account and signs it in.
    ///
    /// # Errors
    /// Fails with `IdentifierInUse`, `WeakSecret`, `InvalidIdentifier`,
    /// `Network`, or `Unknown`.
    pub async fn create_account(
        &self,
        identifier: &str,
        secret: &str,
        profile: &Profile,
    ) -> AuthResult<Identity> {
        let mut body = json!({
            "email": identifier,
            "password": secret,
            "displayName": profile.display_name(),
            "accountType": profile.account_type,
            "returnSecureToken": true,
        });
        if let Some(org) = profile.organization.as_deref() {
            body["organization"] = json!(org);
        }
        if let Some(phone) = profile.phone.as_deref() {
            body["phone"] = json!(phone);
        }

        let response = self.post("accounts:signUp", &body).await?;
        let identity = self.install_session(response);
        tracing::info!(uid = %identity.uid, "account created");
        Ok(identity)
    }

    /// Verifies credentials and signs the account in.
    ///
    /// # Errors
    /// Fails with `NotFound`, `WrongSecret`, `DisabledAccount`,
    /// `TooManyAttempts`, `Network`, or `Unknown`.
    pub async fn verify_credentials(
        &self,
        identifier: &str,
        secret: &str,
    ) -> AuthResult<Identity> {
        let body = json!({
            "email": identifier,
            "password": secret,
            "returnSecureToken": true,
        });
        let response = self.post("accounts:signInWithPassword", &body).await?;
        let identity = self.install_session(response);
        tracing::info!(uid = %identity.uid, "signed in");
        Ok(identity)
    }

    /// Signs the current session out.
    ///
    /// On success the held token is dropped and subscribers are notified.
    /// On failure the session is left untouched.
    ///
    /// # Errors
    /// Fails with `Network` or `Unknown`.
    pub async fn sign_out(&self) -> AuthResult<()> {
        let token = self.token.lock().expect("token lock").clone();
        let Some(token) = token else {
            // No live session; notify anyway so state converges.
            self.clear_session();
            return Ok(());
        };

        let body = json!({ "idToken": token });
        self.request_raw("accounts:signOut", &body).await?;
        self.clear_session();
        tracing::info!("signed out");
        Ok(())
    }

    /// Requests a secret (password) reset for the identifier.
    ///
    /// # Errors
    /// Fails with `NotFound`, `InvalidIdentifier`, `Network`, or `Unknown`.
    pub async fn request_secret_reset(&self, identifier: &str) -> AuthResult<()> {
        let body = json!({
            "requestType": "PASSWORD_RESET",
            "email": identifier,
        });
        self.request_raw("accounts:sendOobCode", &body).await?;
        Ok(())
    }

    /// Revalidates the held token against the server.
    ///
    /// Clears the session if the provider no longer recognizes the token.
    /// Network failures leave the session untouched; they say nothing about
    /// token validity.
    pub async fn revalidate_session(&self) {
        let token = self.token.lock().expect("token lock").clone();
        let Some(token) = token else { return };

        let body = json!({ "idToken": token });
        match self.request_raw("accounts:lookup", &body).await {
            Ok(raw) => {
                if let Ok(lookup) = serde_json::from_str::<LookupResponse>(&raw)
                    && let Some(user) = lookup.users.into_iter().next()
                {
                    let identity = Identity {
                        uid: user.local_id,
                        email: user.email,
                        display_name: user.display_name,
                    };
                    self.session_tx.send_if_modified(|current| {
                        if current.as_ref() == Some(&identity) {
                            false
                        } else {
                            *current = Some(identity.clone());
                            true
                        }
                    });
                }
            }
            Err(err) if err.kind == AuthErrorKind::Network => {
                tracing::debug!(error = %err, "session revalidation skipped (network)");
            }
            Err(err) => {
                tracing::info!(error = %err, "session no longer valid, clearing");
                self.clear_session();
            }
        }
    }

    fn install_session(&self, response: CredentialResponse) -> Identity {
        let identity = Identity {
            uid: response.local_id,
            email: response.email,
            display_name: response.display_name,
        };
        *self.token.lock().expect("token lock") = Some(response.id_token);
        let _ = self.session_tx.send(Some(identity.clone()));
        identity
    }

    fn clear_session(&self) {
        *self.token.lock().expect("token lock") = None;
        let _ = self.session_tx.send(None);
    }

    async fn post(&self, endpoint: &str, body: &Value) -> AuthResult<CredentialResponse> {
        let raw = self.request_raw(endpoint, body).await?;
        serde_json::from_str(&raw).map_err(|e| {
            AuthError::new(
                AuthErrorKind::Unknown,
                format!("malformed {endpoint} response: {e}"),
            )
        })
    }

    async fn request_raw(&self, endpoint: &str, body: &Value) -> AuthResult<String> {
        let url = format!("{}/v1/{endpoint}", self.base_url);
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::from_transport(&e))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(AuthError::from_status(status.as_u16(), &text));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_map_to_kinds() {
        let cases = [
            ("EMAIL_EXISTS", AuthErrorKind::IdentifierInUse),
            ("WEAK_PASSWORD : Password should be at least 6 characters", AuthErrorKind::WeakSecret),
            ("INVALID_EMAIL", AuthErrorKind::InvalidIdentifier),
            ("EMAIL_NOT_FOUND", AuthErrorKind::NotFound),
            ("INVALID_PASSWORD", AuthErrorKind::WrongSecret),
            ("INVALID_LOGIN_CREDENTIALS", AuthErrorKind::WrongSecret),
            ("USER_DISABLED", AuthErrorKind::DisabledAccount),
            ("TOO_MANY_ATTEMPTS_TRY_LATER", AuthErrorKind::TooManyAttempts),
            ("SOMETHING_ELSE", AuthErrorKind::Unknown),
        ];
        for (code, kind) in cases {
            let body = format!(r#"{{"error":{{"message":"{code}"}}}}"#);
            let err = AuthError::from_status(400, &body);
            assert_eq!(err.kind, kind, "code {code}");
        }
    }

    #[test]
    fn unparseable_body_maps_to_unknown() {
        let err = AuthError::from_status(500, "gateway timeout");
        assert_eq!(err.kind, AuthErrorKind::Unknown);
        assert_eq!(err.message, "HTTP 500");
        assert_eq!(err.details.as_deref(), Some("gateway timeout"));
    }

    #[test]
    fn user_messages_cover_credential_errors() {
        let err = AuthError::new(AuthErrorKind::TooManyAttempts, "HTTP 400");
        assert_eq!(err.user_message(), "Too many attempts. Please try again later.");
        let err = AuthError::new(AuthErrorKind::Network, "connection refused");
        assert!(err.user_message().contains("Network error"));
    }

    #[test]
    fn profile_display_name_joins_and_trims() {
        let profile = Profile {
            first_name: " Asha ".to_string(),
            last_name: "Verma".to_string(),
            account_type: AccountType::Citizen,
            organization: None,
            phone: None,
        };
        assert_eq!(profile.display_name(), "Asha Verma");
    }
}
