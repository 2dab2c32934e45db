use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::application::app_error::AppResult;
use crate::domain::entities::identity::{Identity, ProviderSession};

/// Fixed paths appended to the application origin when building the
/// provider redirect links.
pub const CALLBACK_PATH: &str = "/auth/callback";
pub const RESET_PASSWORD_PATH: &str = "/auth/reset-password";

/// Auth-state change pushed by the provider. Delivery is in-order per
/// provider; the workflow applies events strictly in arrival order and
/// never re-orders.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    SignedIn(ProviderSession),
    SignedOut,
}

/// Port over the managed identity service (sessions, credentials, email
/// verification, password reset). Everything behind this trait is owned
/// by the provider; the application only orchestrates calls against it.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an identity. `metadata` is an opaque bag stored on the
    /// identity; `redirect_to` is where the verification link lands.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
        redirect_to: &str,
    ) -> AppResult<Identity>;

    /// Authenticate credentials and issue a session. Note: per provider
    /// contract this succeeds even for unverified emails; the workflow is
    /// responsible for compensating.
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<ProviderSession>;

    async fn sign_out(&self, access_token: &str) -> AppResult<()>;

    async fn current_session(&self) -> AppResult<Option<ProviderSession>>;

    /// Resolve the identity an access token authenticates, if any.
    async fn identity_by_token(&self, access_token: &str) -> AppResult<Option<Identity>>;

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;

    async fn resend_verification(&self, email: &str, redirect_to: &str) -> AppResult<()>;

    async fn send_password_reset(&self, email: &str, redirect_to: &str) -> AppResult<()>;
}
