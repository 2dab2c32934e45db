use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::broadcast;
use tokio::sync::Mutex;
use tracing::{error, warn};
use uuid::Uuid;

use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::identity::{AuthEvent, IdentityProvider};
use crate::domain::entities::id::Id;
use crate::domain::entities::identity::{Identity, ProviderSession};

const EVENT_CAPACITY: usize = 64;

/// Adapter for a GoTrue-compatible identity API (the auth component of the
/// managed platform the profiles live on). Holds the one client-side
/// session, mirroring how the platform's own SDK does, and emits auth
/// events for the calls it makes itself.
pub struct GoTrueIdentityProvider {
    http: Client,
    base_url: String,
    api_key: String,
    session: Mutex<Option<ProviderSession>>,
    events: broadcast::Sender<AuthEvent>,
}

#[derive(Debug, Deserialize)]
struct UserBody {
    id: Uuid,
    email: String,
    email_confirmed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    user_metadata: Value,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    access_token: String,
    user: UserBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
}

impl From<UserBody> for Identity {
    fn from(body: UserBody) -> Self {
        Identity {
            id: Id::new(body.id),
            email: body.email,
            email_confirmed_at: body.email_confirmed_at,
            metadata: body.user_metadata,
            created_at: body.created_at,
        }
    }
}

impl GoTrueIdentityProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            session: Mutex::new(None),
            events,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_key(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("apikey", &self.api_key)
    }

    fn emit(&self, event: AuthEvent) {
        let _ = self.events.send(event);
    }

    async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        request.send().await.map_err(|err| {
            error!("Identity provider request failed: {}", err);
            AppError::ProviderUnreachable(err.to_string())
        })
    }

    /// Turn a non-success response into the provider's own message,
    /// verbatim, falling back to the HTTP status text.
    async fn rejection(response: Response) -> AppError {
        let status = response.status();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body
                .msg
                .or(body.message)
                .or(body.error_description)
                .unwrap_or_else(|| status.to_string()),
            Err(_) => status.to_string(),
        };
        AppError::ProviderRejected(message)
    }

    async fn parse<T: serde::de::DeserializeOwned>(&self, response: Response) -> AppResult<T> {
        response.json::<T>().await.map_err(|err| {
            error!("Malformed identity provider response: {}", err);
            AppError::ProviderUnreachable(err.to_string())
        })
    }
}

#[async_trait]
impl IdentityProvider for GoTrueIdentityProvider {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
        redirect_to: &str,
    ) -> AppResult<Identity> {
        let request = self
            .apply_key(self.http.post(self.url("/signup")))
            .query(&[("redirect_to", redirect_to)])
            .json(&json!({
                "email": email,
                "password": password,
                "data": metadata,
            }));
        let response = self.send(request).await?;
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }
        let user: UserBody = self.parse(response).await?;
        Ok(user.into())
    }

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<ProviderSession> {
        let request = self
            .apply_key(self.http.post(self.url("/token")))
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }));
        let response = self.send(request).await?;
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }
        let token: TokenBody = self.parse(response).await?;
        let session = ProviderSession {
            access_token: token.access_token,
            identity: token.user.into(),
        };
        *self.session.lock().await = Some(session.clone());
        self.emit(AuthEvent::SignedIn(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self, access_token: &str) -> AppResult<()> {
        let request = self
            .apply_key(self.http.post(self.url("/logout")))
            .bearer_auth(access_token);
        let response = self.send(request).await?;
        if !response.status().is_success() && response.status() != StatusCode::UNAUTHORIZED {
            warn!("Provider sign-out returned {}", response.status());
        }
        let mut session = self.session.lock().await;
        if session.as_ref().map(|s| s.access_token.as_str()) == Some(access_token) {
            *session = None;
        }
        drop(session);
        self.emit(AuthEvent::SignedOut);
        Ok(())
    }

    async fn current_session(&self) -> AppResult<Option<ProviderSession>> {
        let held = self.session.lock().await.clone();
        let Some(held) = held else {
            return Ok(None);
        };
        // Revalidate against the provider; tokens can be revoked remotely.
        match self.identity_by_token(&held.access_token).await? {
            Some(identity) => Ok(Some(ProviderSession {
                access_token: held.access_token,
                identity,
            })),
            None => {
                *self.session.lock().await = None;
                Ok(None)
            }
        }
    }

    async fn identity_by_token(&self, access_token: &str) -> AppResult<Option<Identity>> {
        let request = self
            .apply_key(self.http.get(self.url("/user")))
            .bearer_auth(access_token);
        let response = self.send(request).await?;
        if response.status() == StatusCode::UNAUTHORIZED || response.status() == StatusCode::FORBIDDEN {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }
        let user: UserBody = self.parse(response).await?;
        Ok(Some(user.into()))
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    async fn resend_verification(&self, email: &str, redirect_to: &str) -> AppResult<()> {
        let request = self
            .apply_key(self.http.post(self.url("/resend")))
            .query(&[("redirect_to", redirect_to)])
            .json(&json!({ "type": "signup", "email": email }));
        let response = self.send(request).await?;
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }
        Ok(())
    }

    async fn send_password_reset(&self, email: &str, redirect_to: &str) -> AppResult<()> {
        let request = self
            .apply_key(self.http.post(self.url("/recover")))
            .query(&[("redirect_to", redirect_to)])
            .json(&json!({ "email": email }));
        let response = self.send(request).await?;
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }
        Ok(())
    }
}
