use axum::{response::Html, Json};
use utoipa::{
    openapi::{
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
        OpenApi as OpenApiDoc,
    },
    Modify, OpenApi,
};

use crate::adapter::http::{
    app_error_impl::ErrorResponse,
    routes::{auth, dashboard, pages, profile, register},
    schema::{
        auth::{
            ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse,
            ResendVerificationRequest, SessionStateResponse, VerificationCallbackResponse,
        },
        listing::{
            ClientDashboardResponse, NunnyCardResponse, NunnyDashboardResponse, NunnyStatsResponse,
            OfferClientResponse, OfferResponse, OfferStatsResponse,
        },
        pages::{AboutResponse, AppInfoResponse},
        profile::{ProfileResponse, UpdateProfileRequest},
        register::{ClientRegisterRequest, NunnyRegisterRequest, RegisterResponse},
    },
};
use crate::application::listing::{NunnySort, OfferSort};
use crate::domain::entities::profile::{Gender, ProfileKind};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut OpenApiDoc) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    paths(
        pages::home,
        pages::about,
        register::register_nunny,
        register::register_client,
        auth::nunny_login,
        auth::client_login,
        auth::logout,
        auth::callback,
        auth::resend_verification,
        auth::forgot_password,
        auth::session,
        dashboard::nunny_dashboard,
        dashboard::client_dashboard,
        profile::get_me,
        profile::update_profile,
    ),
    components(schemas(
        AppInfoResponse,
        AboutResponse,
        NunnyRegisterRequest,
        ClientRegisterRequest,
        RegisterResponse,
        LoginRequest,
        LoginResponse,
        MessageResponse,
        ResendVerificationRequest,
        ForgotPasswordRequest,
        VerificationCallbackResponse,
        SessionStateResponse,
        ProfileResponse,
        UpdateProfileRequest,
        NunnyDashboardResponse,
        ClientDashboardResponse,
        OfferResponse,
        OfferClientResponse,
        NunnyCardResponse,
        OfferStatsResponse,
        NunnyStatsResponse,
        ErrorResponse,
        Gender,
        ProfileKind,
        OfferSort,
        NunnySort,
    )),
    tags(
        (name = "Pages", description = "Public landing pages"),
        (name = "Register", description = "Nunny and client registration"),
        (name = "Auth", description = "Sessions, verification, password reset"),
        (name = "Dashboard", description = "Browse listings"),
        (name = "Profile", description = "The signed-in user's profile"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<OpenApiDoc> {
    Json(ApiDoc::openapi())
}

pub async fn docs_ui() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
  <head>
    <title>My Nunny API</title>
    <meta charset="utf-8"/>
    <meta name="viewport" content="width=device-width, initial-scale=1">
  </head>
  <body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist/swagger-ui-bundle.js"></script>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist/swagger-ui.css"/>
    <script>
      window.onload = () => {
        SwaggerUIBundle({ url: '/openapi.json', dom_id: '#swagger-ui' });
      };
    </script>
  </body>
</html>"#,
    )
}
