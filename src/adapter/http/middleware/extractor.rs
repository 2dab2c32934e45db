use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::application::app_error::{AppError, AppResult};
use crate::domain::entities::identity::Identity;
use crate::domain::entities::profile::Profile;

/// Identity resolved from the request's bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub access_token: String,
    pub identity: Identity,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> AppResult<Self> {
        match parts.extensions.get::<AuthUser>().cloned() {
            Some(user) => Ok(user),
            None => Err(AppError::InvalidCredentials),
        }
    }
}

/// Profile attached by the discriminator guard.
#[derive(Debug, Clone)]
pub struct CurrentProfile(pub Profile);

impl<S> FromRequestParts<S> for CurrentProfile
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> AppResult<Self> {
        match parts.extensions.get::<CurrentProfile>().cloned() {
            Some(profile) => Ok(profile),
            None => Err(AppError::NoUserLoggedIn),
        }
    }
}
