use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::middleware::extractor::AuthUser;
use crate::adapter::http::schema::profile::{ProfileResponse, UpdateProfileRequest};
use crate::application::app_error::AppResult;
use crate::application::interactors::profile::{GetProfileInteractor, UpdateProfileInteractor};

#[utoipa::path(
    get,
    path = "/profile/me",
    tag = "Profile",
    responses(
        (
            status = 200,
            description = "The signed-in user's profile",
            body = ProfileResponse
        ),
        (
            status = 401,
            description = "Missing or invalid access token",
            body = ErrorResponse
        ),
        (
            status = 404,
            description = "No profile row exists yet for this identity",
            body = ErrorResponse
        )
    ),
    security(("bearerAuth" = []))
)]
pub async fn get_me(
    auth_user: AuthUser,
    interactor: GetProfileInteractor,
) -> AppResult<impl IntoResponse> {
    let profile = interactor.execute(&auth_user.identity.id).await?;
    Ok((StatusCode::OK, Json(ProfileResponse::from(profile))))
}

#[utoipa::path(
    patch,
    path = "/profile",
    tag = "Profile",
    request_body(content = UpdateProfileRequest),
    responses(
        (
            status = 200,
            description = "Profile updated; the stored row is returned",
            body = ProfileResponse
        ),
        (
            status = 401,
            description = "No user logged in",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "No user logged in"
                }
            )
        )
    ),
    security(("bearerAuth" = []))
)]
pub async fn update_profile(
    auth_user: AuthUser,
    interactor: UpdateProfileInteractor,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<impl IntoResponse> {
    let profile = interactor.execute(&auth_user.identity.id, payload.into()).await?;
    Ok((StatusCode::OK, Json(ProfileResponse::from(profile))))
}
