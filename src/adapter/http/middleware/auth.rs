use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::adapter::http::middleware::extractor::{AuthUser, CurrentProfile};
use crate::application::app_error::{AppError, AppResult};
use crate::domain::entities::profile::ProfileKind;
use crate::infra::state::AppState;

/// Resolves the bearer token through the identity provider and attaches
/// the authenticated identity to the request.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let access_token = extract_bearer_token(&request)?;
    let identity = state
        .provider
        .identity_by_token(&access_token)
        .await?
        .ok_or(AppError::InvalidCredentials)?;
    request.extensions_mut().insert(AuthUser {
        access_token,
        identity,
    });
    Ok(next.run(request).await)
}

fn extract_bearer_token(request: &Request) -> AppResult<String> {
    let header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::InvalidCredentials)?;
    header
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
        .ok_or(AppError::InvalidCredentials)
}

async fn require_kind(
    state: AppState,
    mut request: Request,
    next: Next,
    kind: ProfileKind,
    label: &'static str,
) -> AppResult<Response> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or(AppError::InvalidCredentials)?;
    let profile = state
        .profiles
        .open()
        .reader
        .find_by_identity(&auth_user.identity.id)
        .await?
        .ok_or(AppError::NoUserLoggedIn)?;
    if profile.kind() != kind {
        return Err(AppError::WrongAccountKind(label));
    }
    request.extensions_mut().insert(CurrentProfile(profile));
    Ok(next.run(request).await)
}

/// Dashboard guard: the route is only reachable with a nunny profile.
pub async fn require_nunny(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    require_kind(state, request, next, ProfileKind::Nunny, "nunny").await
}

/// Dashboard guard: the route is only reachable with a client profile.
pub async fn require_client(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    require_kind(state, request, next, ProfileKind::Client, "client").await
}
