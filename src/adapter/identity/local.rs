use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::broadcast;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::identity::{AuthEvent, IdentityProvider};
use crate::domain::entities::id::Id;
use crate::domain::entities::identity::{Identity, ProviderSession};

const EVENT_CAPACITY: usize = 64;

struct Account {
    identity: Identity,
    password: String,
}

#[derive(Default)]
struct ProviderState {
    accounts: HashMap<String, Account>,
    sessions: HashMap<String, Id<Identity>>,
    current: Option<String>,
    verification_emails: Vec<(String, String)>,
    reset_emails: Vec<(String, String)>,
}

/// In-process stand-in for the managed identity service, used for
/// development and tests. Behaves like the real thing at the port
/// boundary: sign-in succeeds for unverified accounts (callers must
/// compensate), events are broadcast in issue order, and the "emails" it
/// sends are only recorded.
pub struct LocalIdentityProvider {
    state: Mutex<ProviderState>,
    events: broadcast::Sender<AuthEvent>,
    auto_confirm: bool,
}

impl LocalIdentityProvider {
    pub fn new(auto_confirm: bool) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: Mutex::new(ProviderState::default()),
            events,
            auto_confirm,
        }
    }

    fn emit(&self, event: AuthEvent) {
        // No receivers is fine; the monitor subscribes when it wants to.
        let _ = self.events.send(event);
    }

    /// Simulate the user clicking the verification link: flip the flag,
    /// land a session and notify, as the real provider redirect would.
    pub async fn complete_verification(&self, email: &str) -> AppResult<ProviderSession> {
        let mut state = self.state.lock().await;
        let account = state
            .accounts
            .get_mut(email)
            .ok_or_else(|| AppError::ProviderRejected("User not found".to_string()))?;
        if account.identity.email_confirmed_at.is_none() {
            account.identity.email_confirmed_at = Some(Utc::now());
        }
        let session = ProviderSession {
            access_token: Uuid::now_v7().to_string(),
            identity: account.identity.clone(),
        };
        state.sessions.insert(session.access_token.clone(), session.identity.id.clone());
        state.current = Some(session.access_token.clone());
        drop(state);
        self.emit(AuthEvent::SignedIn(session.clone()));
        Ok(session)
    }

    pub async fn identity_of(&self, email: &str) -> Option<Identity> {
        let state = self.state.lock().await;
        state.accounts.get(email).map(|a| a.identity.clone())
    }

    pub async fn verification_emails(&self) -> Vec<(String, String)> {
        self.state.lock().await.verification_emails.clone()
    }

    pub async fn reset_emails(&self) -> Vec<(String, String)> {
        self.state.lock().await.reset_emails.clone()
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
        redirect_to: &str,
    ) -> AppResult<Identity> {
        let mut state = self.state.lock().await;
        if state.accounts.contains_key(email) {
            return Err(AppError::ProviderRejected("User already registered".to_string()));
        }
        if password.len() < 6 {
            return Err(AppError::ProviderRejected(
                "Password should be at least 6 characters".to_string(),
            ));
        }
        let mut identity = Identity::new(email.to_string(), metadata);
        if self.auto_confirm {
            identity.email_confirmed_at = Some(Utc::now());
        } else {
            state
                .verification_emails
                .push((email.to_string(), redirect_to.to_string()));
        }
        state.accounts.insert(
            email.to_string(),
            Account {
                identity: identity.clone(),
                password: password.to_string(),
            },
        );
        info!("Local provider registered {}", email);
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<ProviderSession> {
        let mut state = self.state.lock().await;
        let account = state
            .accounts
            .get(email)
            .filter(|account| account.password == password)
            .ok_or_else(|| AppError::ProviderRejected("Invalid login credentials".to_string()))?;
        let session = ProviderSession {
            access_token: Uuid::now_v7().to_string(),
            identity: account.identity.clone(),
        };
        state.sessions.insert(session.access_token.clone(), session.identity.id.clone());
        state.current = Some(session.access_token.clone());
        drop(state);
        self.emit(AuthEvent::SignedIn(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self, access_token: &str) -> AppResult<()> {
        let mut state = self.state.lock().await;
        state.sessions.remove(access_token);
        if state.current.as_deref() == Some(access_token) {
            state.current = None;
        }
        drop(state);
        self.emit(AuthEvent::SignedOut);
        Ok(())
    }

    async fn current_session(&self) -> AppResult<Option<ProviderSession>> {
        let state = self.state.lock().await;
        let Some(token) = state.current.clone() else {
            return Ok(None);
        };
        let Some(identity_id) = state.sessions.get(&token) else {
            return Ok(None);
        };
        let identity = state
            .accounts
            .values()
            .find(|account| account.identity.id == *identity_id)
            .map(|account| account.identity.clone());
        Ok(identity.map(|identity| ProviderSession {
            access_token: token,
            identity,
        }))
    }

    async fn identity_by_token(&self, access_token: &str) -> AppResult<Option<Identity>> {
        let state = self.state.lock().await;
        let Some(identity_id) = state.sessions.get(access_token) else {
            return Ok(None);
        };
        Ok(state
            .accounts
            .values()
            .find(|account| account.identity.id == *identity_id)
            .map(|account| account.identity.clone()))
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    async fn resend_verification(&self, email: &str, redirect_to: &str) -> AppResult<()> {
        let mut state = self.state.lock().await;
        if !state.accounts.contains_key(email) {
            return Err(AppError::ProviderRejected("User not found".to_string()));
        }
        state
            .verification_emails
            .push((email.to_string(), redirect_to.to_string()));
        Ok(())
    }

    async fn send_password_reset(&self, email: &str, redirect_to: &str) -> AppResult<()> {
        let mut state = self.state.lock().await;
        // Like the managed service, unknown addresses get the same answer.
        if state.accounts.contains_key(email) {
            state.reset_emails.push((email.to_string(), redirect_to.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::adapter::identity::local::LocalIdentityProvider;
    use crate::application::app_error::AppError;
    use crate::application::interface::identity::{AuthEvent, IdentityProvider};

    const EMAIL: &str = "grace@example.com";
    const PASSWORD: &str = "secret1";

    #[tokio::test]
    async fn test_duplicate_sign_up_rejected() {
        let provider = LocalIdentityProvider::new(false);
        provider.sign_up(EMAIL, PASSWORD, json!({}), "http://x/auth/callback").await.unwrap();

        let err = provider
            .sign_up(EMAIL, PASSWORD, json!({}), "http://x/auth/callback")
            .await
            .unwrap_err();
        match err {
            AppError::ProviderRejected(message) => assert_eq!(message, "User already registered"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        let provider = LocalIdentityProvider::new(false);
        let err = provider
            .sign_up(EMAIL, "abc", json!({}), "http://x/auth/callback")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ProviderRejected(_)));
    }

    #[tokio::test]
    async fn test_sign_in_issues_session_even_unverified() {
        let provider = LocalIdentityProvider::new(false);
        provider.sign_up(EMAIL, PASSWORD, json!({}), "http://x/auth/callback").await.unwrap();

        let session = provider.sign_in(EMAIL, PASSWORD).await.unwrap();
        assert!(!session.identity.is_confirmed());
        assert!(provider
            .identity_by_token(&session.access_token)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_sign_out_invalidates_token_and_notifies() {
        let provider = LocalIdentityProvider::new(true);
        provider.sign_up(EMAIL, PASSWORD, json!({}), "http://x/auth/callback").await.unwrap();
        let mut events = provider.subscribe();
        let session = provider.sign_in(EMAIL, PASSWORD).await.unwrap();

        provider.sign_out(&session.access_token).await.unwrap();

        assert!(provider.identity_by_token(&session.access_token).await.unwrap().is_none());
        assert!(provider.current_session().await.unwrap().is_none());
        assert!(matches!(events.recv().await.unwrap(), AuthEvent::SignedIn(_)));
        assert!(matches!(events.recv().await.unwrap(), AuthEvent::SignedOut));
    }

    #[tokio::test]
    async fn test_complete_verification_lands_session() {
        let provider = LocalIdentityProvider::new(false);
        provider.sign_up(EMAIL, PASSWORD, json!({}), "http://x/auth/callback").await.unwrap();
        assert_eq!(provider.verification_emails().await.len(), 1);

        let session = provider.complete_verification(EMAIL).await.unwrap();
        assert!(session.identity.is_confirmed());

        let current = provider.current_session().await.unwrap().unwrap();
        assert_eq!(current.access_token, session.access_token);
    }

    #[tokio::test]
    async fn test_password_reset_is_enumeration_safe() {
        let provider = LocalIdentityProvider::new(false);
        assert!(provider
            .send_password_reset("nobody@example.com", "http://x/auth/reset-password")
            .await
            .is_ok());
        assert!(provider.reset_emails().await.is_empty());
    }
}
