use serde::{Deserialize, Serialize};
use serde_email::Email;
use utoipa::ToSchema;
use validator::Validate;

use crate::adapter::http::schema::profile::ProfileResponse;
use crate::domain::entities::auth_state::AuthState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[schema(value_type = String)]
    pub email: Email,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub access_token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResendVerificationRequest {
    #[schema(value_type = String)]
    pub email: Email,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordRequest {
    #[schema(value_type = String)]
    pub email: Email,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerificationCallbackResponse {
    pub verified: bool,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionStateResponse {
    pub status: &'static str,
    pub loading: bool,
    pub email: Option<String>,
    pub profile: Option<ProfileResponse>,
}

impl From<AuthState> for SessionStateResponse {
    fn from(state: AuthState) -> Self {
        match state {
            AuthState::Initializing => SessionStateResponse {
                status: "initializing",
                loading: true,
                email: None,
                profile: None,
            },
            AuthState::Unauthenticated => SessionStateResponse {
                status: "unauthenticated",
                loading: false,
                email: None,
                profile: None,
            },
            AuthState::Authenticated { identity, profile } => SessionStateResponse {
                status: "authenticated",
                loading: false,
                email: Some(identity.email),
                profile: profile.map(ProfileResponse::from),
            },
        }
    }
}
