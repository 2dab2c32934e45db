use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;

use crate::application::app_error::{AppError, AppResult};
use crate::application::interactors::auth::{LoginInteractor, LogoutInteractor};
use crate::application::interactors::password_reset::RequestPasswordResetInteractor;
use crate::application::interactors::profile::{GetProfileInteractor, UpdateProfileInteractor};
use crate::application::interactors::registration::{CompleteVerificationInteractor, RegisterInteractor};
use crate::application::interactors::session::SessionMonitor;
use crate::application::interactors::verification::ResendVerificationInteractor;
use crate::application::interface::gateway::profile::ProfileStore;
use crate::application::interface::identity::IdentityProvider;
use crate::infra::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub provider: Arc<dyn IdentityProvider>,
    pub profiles: Arc<dyn ProfileStore>,
    pub monitor: Arc<SessionMonitor>,
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

#[async_trait]
pub trait FromAppState: Sized {
    async fn from_app_state(state: &AppState) -> AppResult<Self>;
}

// RegisterInteractor
#[async_trait]
impl FromAppState for RegisterInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let handle = state.profiles.open();

        Ok(RegisterInteractor::new(
            handle.session,
            handle.writer,
            state.provider.clone(),
        ))
    }
}

impl<S> FromRequestParts<S> for RegisterInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        RegisterInteractor::from_app_state(&app_state).await
    }
}

// LoginInteractor
#[async_trait]
impl FromAppState for LoginInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let handle = state.profiles.open();

        Ok(LoginInteractor::new(
            handle.session,
            handle.reader,
            handle.writer,
            state.provider.clone(),
            state.monitor.clone(),
        ))
    }
}

impl<S> FromRequestParts<S> for LoginInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        LoginInteractor::from_app_state(&app_state).await
    }
}

// LogoutInteractor
#[async_trait]
impl FromAppState for LogoutInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        Ok(LogoutInteractor::new(state.provider.clone(), state.monitor.clone()))
    }
}

impl<S> FromRequestParts<S> for LogoutInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        LogoutInteractor::from_app_state(&app_state).await
    }
}

// CompleteVerificationInteractor
#[async_trait]
impl FromAppState for CompleteVerificationInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let handle = state.profiles.open();

        Ok(CompleteVerificationInteractor::new(
            handle.session,
            handle.writer,
            state.provider.clone(),
        ))
    }
}

impl<S> FromRequestParts<S> for CompleteVerificationInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        CompleteVerificationInteractor::from_app_state(&app_state).await
    }
}

// ResendVerificationInteractor
#[async_trait]
impl FromAppState for ResendVerificationInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        Ok(ResendVerificationInteractor::new(state.provider.clone()))
    }
}

impl<S> FromRequestParts<S> for ResendVerificationInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        ResendVerificationInteractor::from_app_state(&app_state).await
    }
}

// RequestPasswordResetInteractor
#[async_trait]
impl FromAppState for RequestPasswordResetInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        Ok(RequestPasswordResetInteractor::new(state.provider.clone()))
    }
}

impl<S> FromRequestParts<S> for RequestPasswordResetInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        RequestPasswordResetInteractor::from_app_state(&app_state).await
    }
}

// GetProfileInteractor
#[async_trait]
impl FromAppState for GetProfileInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let handle = state.profiles.open();

        Ok(GetProfileInteractor::new(handle.reader))
    }
}

impl<S> FromRequestParts<S> for GetProfileInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        GetProfileInteractor::from_app_state(&app_state).await
    }
}

// UpdateProfileInteractor
#[async_trait]
impl FromAppState for UpdateProfileInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let handle = state.profiles.open();

        Ok(UpdateProfileInteractor::new(
            handle.session,
            handle.reader,
            handle.writer,
            state.monitor.clone(),
        ))
    }
}

impl<S> FromRequestParts<S> for UpdateProfileInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        UpdateProfileInteractor::from_app_state(&app_state).await
    }
}
