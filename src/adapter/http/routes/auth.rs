use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::middleware::extractor::AuthUser;
use crate::adapter::http::schema::auth::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse, ResendVerificationRequest,
    SessionStateResponse, VerificationCallbackResponse,
};
use crate::adapter::http::validation::ValidJson;
use crate::application::app_error::AppResult;
use crate::application::dto::auth::{LoginDTO, RequestPasswordResetDTO, ResendVerificationDTO};
use crate::application::interactors::auth::{LoginInteractor, LogoutInteractor};
use crate::application::interactors::password_reset::RequestPasswordResetInteractor;
use crate::application::interactors::registration::CompleteVerificationInteractor;
use crate::application::interactors::verification::ResendVerificationInteractor;
use crate::infra::config::AppConfig;
use crate::infra::state::AppState;

async fn do_login(interactor: LoginInteractor, payload: LoginRequest) -> AppResult<impl IntoResponse> {
    let dto = LoginDTO {
        email: payload.email.to_string(),
        password: payload.password,
    };
    let session = interactor.execute(dto).await?;
    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            message: "Login successful".to_string(),
            access_token: session.access_token,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/nunny/login",
    tag = "Auth",
    request_body(
        content = LoginRequest,
        example = json!(
            {
                "email": "grace@example.com",
                "password": "secret1"
            }
        )
    ),
    responses(
        (
            status = 200,
            description = "Login successful",
            body = LoginResponse
        ),
        (
            status = 400,
            description = "Provider rejected the credentials",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "Invalid login credentials"
                }
            )
        ),
        (
            status = 403,
            description = "Email is not verified; the issued session was terminated",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "Please verify your email address before logging in"
                }
            )
        )
    )
)]
pub async fn nunny_login(
    interactor: LoginInteractor,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    do_login(interactor, payload).await
}

#[utoipa::path(
    post,
    path = "/client/login",
    tag = "Auth",
    request_body(content = LoginRequest),
    responses(
        (
            status = 200,
            description = "Login successful",
            body = LoginResponse
        ),
        (
            status = 400,
            description = "Provider rejected the credentials",
            body = ErrorResponse
        ),
        (
            status = 403,
            description = "Email is not verified; the issued session was terminated",
            body = ErrorResponse
        )
    )
)]
pub async fn client_login(
    interactor: LoginInteractor,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    do_login(interactor, payload).await
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Auth",
    responses(
        (
            status = 200,
            description = "Logged out successfully",
            body = MessageResponse
        ),
        (
            status = 401,
            description = "Missing or invalid access token",
            body = ErrorResponse
        )
    ),
    security(("bearerAuth" = []))
)]
pub async fn logout(
    auth_user: AuthUser,
    interactor: LogoutInteractor,
) -> AppResult<impl IntoResponse> {
    interactor.execute(&auth_user.access_token).await?;
    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/auth/callback",
    tag = "Auth",
    responses(
        (
            status = 200,
            description = "Verification redirect landed; reports whether a verified session exists",
            body = VerificationCallbackResponse
        )
    )
)]
pub async fn callback(interactor: CompleteVerificationInteractor) -> AppResult<impl IntoResponse> {
    let response = match interactor.execute().await? {
        Some(_) => VerificationCallbackResponse {
            verified: true,
            message: "Email verified successfully! You can now log in.".to_string(),
        },
        None => VerificationCallbackResponse {
            verified: false,
            message: "No session found. Please try the verification link again.".to_string(),
        },
    };
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/auth/resend-verification",
    tag = "Auth",
    request_body(content = ResendVerificationRequest),
    responses(
        (
            status = 200,
            description = "Verification email resent",
            body = MessageResponse
        ),
        (
            status = 400,
            description = "Provider rejected the request",
            body = ErrorResponse
        )
    )
)]
pub async fn resend_verification(
    interactor: ResendVerificationInteractor,
    State(config): State<Arc<AppConfig>>,
    ValidJson(payload): ValidJson<ResendVerificationRequest>,
) -> AppResult<impl IntoResponse> {
    interactor
        .execute(ResendVerificationDTO {
            email: payload.email.to_string(),
            redirect_origin: config.application.origin.clone(),
        })
        .await?;
    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Verification email has been resent".to_string(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/auth/forgot-password",
    tag = "Auth",
    request_body(content = ForgotPasswordRequest),
    responses(
        (
            status = 200,
            description = "Always succeeds; account existence is not disclosed",
            body = MessageResponse
        )
    )
)]
pub async fn forgot_password(
    interactor: RequestPasswordResetInteractor,
    State(config): State<Arc<AppConfig>>,
    ValidJson(payload): ValidJson<ForgotPasswordRequest>,
) -> AppResult<impl IntoResponse> {
    interactor
        .execute(RequestPasswordResetDTO {
            email: payload.email.to_string(),
            redirect_origin: config.application.origin.clone(),
        })
        .await?;
    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "If that email is registered, a reset link has been sent".to_string(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/auth/session",
    tag = "Auth",
    responses(
        (
            status = 200,
            description = "Current reactive auth state",
            body = SessionStateResponse
        )
    )
)]
pub async fn session(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let snapshot = state.monitor.snapshot();
    Ok((StatusCode::OK, Json(SessionStateResponse::from(snapshot))))
}
