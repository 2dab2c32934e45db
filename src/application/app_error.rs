use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Rejection reported by the identity provider, surfaced verbatim.
    #[error("{0}")]
    ProviderRejected(String),
    /// Transport-level failure talking to the identity provider. The raw
    /// detail is logged, never shown to the caller.
    #[error("identity provider unreachable: {0}")]
    ProviderUnreachable(String),
    #[error("Please verify your email address before logging in")]
    EmailNotVerified,
    #[error("No user logged in")]
    NoUserLoggedIn,
    #[error("Invalid Credentials")]
    InvalidCredentials,
    #[error("A profile already exists for this account")]
    ProfileExists,
    #[error("Profile not found")]
    ProfileNotFound,
    #[error("This page is only available to {0} accounts")]
    WrongAccountKind(&'static str),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    /// Per-field wizard errors. Blocks submission before the workflow runs.
    #[error("Validation failed")]
    FormInvalid(BTreeMap<String, String>),
    #[error(transparent)]
    ValidationError(#[from] validator::ValidationErrors),
    #[error(transparent)]
    JsonRejection(#[from] JsonRejection),
    #[error(transparent)]
    DatabaseError(#[from] sqlx::Error),
    #[error(transparent)]
    SerializationError(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
