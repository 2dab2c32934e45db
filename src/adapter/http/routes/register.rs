use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::schema::register::{
    ClientRegisterRequest, NunnyRegisterRequest, RegisterResponse,
};
use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::auth::RegisterDTO;
use crate::application::interactors::registration::RegisterInteractor;
use crate::application::wizard;
use crate::application::wizard::client::ClientForm;
use crate::application::wizard::nunny::NunnyForm;
use crate::infra::config::AppConfig;

fn registration_message(requires_verification: bool) -> String {
    if requires_verification {
        "Registration successful! Please check your email to verify your account.".to_string()
    } else {
        "Registration successful".to_string()
    }
}

#[utoipa::path(
    post,
    path = "/nunny/register",
    tag = "Register",
    request_body(content = NunnyRegisterRequest),
    responses(
        (
            status = 200,
            description = "Nunny registered",
            body = RegisterResponse,
            example = json!(
                {
                    "message": "Registration successful! Please check your email to verify your account.",
                    "requires_verification": true
                }
            )
        ),
        (
            status = 400,
            description = "Provider rejected the registration",
            body = ErrorResponse,
            example = json!(
                {
                    "error": "User already registered"
                }
            )
        ),
        (
            status = 422,
            description = "Wizard validation failed; field map in the body"
        )
    )
)]
pub async fn register_nunny(
    interactor: RegisterInteractor,
    State(config): State<Arc<AppConfig>>,
    Json(payload): Json<NunnyRegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let form = NunnyForm::from(payload);
    let errors = wizard::nunny::validate_all(&form);
    if !errors.is_empty() {
        return Err(AppError::FormInvalid(errors));
    }
    let outcome = interactor
        .execute(RegisterDTO {
            draft: wizard::nunny::draft_from_form(&form),
            password: form.password,
            redirect_origin: config.application.origin.clone(),
        })
        .await?;
    Ok((
        StatusCode::OK,
        Json(RegisterResponse {
            message: registration_message(outcome.requires_verification),
            requires_verification: outcome.requires_verification,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/client/register",
    tag = "Register",
    request_body(content = ClientRegisterRequest),
    responses(
        (
            status = 200,
            description = "Client registered",
            body = RegisterResponse
        ),
        (
            status = 400,
            description = "Provider rejected the registration",
            body = ErrorResponse
        ),
        (
            status = 422,
            description = "Form validation failed; field map in the body"
        )
    )
)]
pub async fn register_client(
    interactor: RegisterInteractor,
    State(config): State<Arc<AppConfig>>,
    Json(payload): Json<ClientRegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let form = ClientForm::from(payload);
    let draft = wizard::client::submit(&form).map_err(AppError::FormInvalid)?;
    let outcome = interactor
        .execute(RegisterDTO {
            draft,
            password: form.password,
            redirect_origin: config.application.origin.clone(),
        })
        .await?;
    Ok((
        StatusCode::OK,
        Json(RegisterResponse {
            message: registration_message(outcome.requires_verification),
            requires_verification: outcome.requires_verification,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use rstest::rstest;
    use tower::ServiceExt;

    use crate::infra::app::create_app;
    use crate::tests::fixtures::init_test_app_state;
    use crate::tests::helpers::{
        body_json, client_register_payload, nunny_register_payload, post_json,
    };

    // Registration against an email that still needs verification returns
    // success with the deferred flag and must NOT create a profile row.
    #[rstest]
    #[tokio::test]
    async fn test_register_client_defers_profile_until_verification() {
        let test_app = init_test_app_state(false);
        let app = create_app(&test_app.state.config, test_app.state.clone());

        let response = app
            .oneshot(post_json("/client/register", client_register_payload("jane@example.com")))
            .await
            .unwrap();
        let status = response.status();
        let json = body_json(response).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["requires_verification"], true);

        let identity = test_app.provider.identity_of("jane@example.com").await.unwrap();
        use crate::application::interface::gateway::profile::ProfileStore;
        let profile = test_app
            .profiles
            .open()
            .reader
            .find_by_identity(&identity.id)
            .await
            .unwrap();
        assert!(profile.is_none(), "no profile row may exist before verification");
        assert_eq!(test_app.provider.verification_emails().await.len(), 1);
    }

    // A pre-verified identity (provider auto-confirm) gets its profile
    // materialized immediately.
    #[rstest]
    #[tokio::test]
    async fn test_register_nunny_preverified_materializes() {
        let test_app = init_test_app_state(true);
        let app = create_app(&test_app.state.config, test_app.state.clone());

        let response = app
            .oneshot(post_json("/nunny/register", nunny_register_payload("grace@example.com")))
            .await
            .unwrap();
        let status = response.status();
        let json = body_json(response).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["requires_verification"], false);

        let identity = test_app.provider.identity_of("grace@example.com").await.unwrap();
        use crate::application::interface::gateway::profile::ProfileStore;
        let profile = test_app
            .profiles
            .open()
            .reader
            .find_by_identity(&identity.id)
            .await
            .unwrap()
            .expect("profile materialized at registration");
        assert_eq!(profile.first_name, "Grace");
    }

    // Wizard validation failures come back as a per-field error map and
    // never reach the provider.
    #[rstest]
    #[tokio::test]
    async fn test_register_client_invalid_rate_gets_field_map() {
        let test_app = init_test_app_state(false);
        let app = create_app(&test_app.state.config, test_app.state.clone());

        let mut payload = client_register_payload("jane@example.com");
        payload["daily_rate"] = serde_json::json!("not-a-number");

        let response = app.oneshot(post_json("/client/register", payload)).await.unwrap();
        let status = response.status();
        let json = body_json(response).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["fields"]["daily_rate"], "Please enter a valid amount");
        assert!(test_app.provider.identity_of("jane@example.com").await.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn test_register_nunny_bad_phone_gets_field_map() {
        let test_app = init_test_app_state(false);
        let app = create_app(&test_app.state.config, test_app.state.clone());

        let mut payload = nunny_register_payload("grace@example.com");
        payload["phone_number"] = serde_json::json!("12345");

        let response = app.oneshot(post_json("/nunny/register", payload)).await.unwrap();
        let status = response.status();
        let json = body_json(response).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["fields"]["phone_number"], "Invalid Kenyan phone number");
    }

    // Duplicate email: the provider's own message is surfaced verbatim.
    #[rstest]
    #[tokio::test]
    async fn test_register_duplicate_email_surfaces_provider_message() {
        let test_app = init_test_app_state(false);
        let app = create_app(&test_app.state.config, test_app.state.clone());

        let first = app
            .clone()
            .oneshot(post_json("/client/register", client_register_payload("jane@example.com")))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .oneshot(post_json("/client/register", client_register_payload("jane@example.com")))
            .await
            .unwrap();
        let status = second.status();
        let json = body_json(second).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "User already registered");
    }
}
