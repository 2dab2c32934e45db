use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

use crate::application::app_error::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

const GENERIC_ERROR: &str = "An unexpected error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::FormInvalid(fields) = &self {
            let body = Json(json!({
                "error": "Validation failed",
                "fields": fields,
            }));
            return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
        }

        let (status, message) = match &self {
            AppError::FormInvalid(_) => (StatusCode::UNPROCESSABLE_ENTITY, None),
            AppError::ProviderRejected(message) => (StatusCode::BAD_REQUEST, Some(message.clone())),
            AppError::EmailNotVerified => (StatusCode::FORBIDDEN, Some(self.to_string())),
            AppError::NoUserLoggedIn => (StatusCode::UNAUTHORIZED, Some(self.to_string())),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, Some(self.to_string())),
            AppError::WrongAccountKind(_) => (StatusCode::FORBIDDEN, Some(self.to_string())),
            AppError::ProfileExists => (StatusCode::CONFLICT, Some(self.to_string())),
            AppError::ProfileNotFound => (StatusCode::NOT_FOUND, Some(self.to_string())),
            AppError::InvalidId(_) => (StatusCode::BAD_REQUEST, None),
            AppError::ValidationError(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Some(errors.to_string()))
            }
            AppError::JsonRejection(rejection) => {
                (StatusCode::BAD_REQUEST, Some(rejection.body_text()))
            }
            AppError::ProviderUnreachable(_)
            | AppError::DatabaseError(_)
            | AppError::SerializationError(_) => {
                // Raw detail stays in the logs; the caller gets the fixed
                // generic message.
                error!("Unexpected failure: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, Some(GENERIC_ERROR.to_string()))
            }
        };

        let message = match message {
            Some(msg) => msg,
            None => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
