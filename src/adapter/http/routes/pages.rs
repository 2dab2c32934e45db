use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect};
use axum::Json;

use crate::adapter::http::schema::pages::{AboutResponse, AppInfoResponse};
use crate::domain::entities::profile::{KENYAN_REGIONS, SERVICES};

#[utoipa::path(
    get,
    path = "/",
    tag = "Pages",
    responses(
        (status = 200, description = "Landing page data", body = AppInfoResponse)
    )
)]
pub async fn home() -> impl IntoResponse {
    let response = AppInfoResponse {
        name: "My Nunny",
        tagline: "Connecting Kenyan households with trusted service providers",
        services: SERVICES.to_vec(),
        regions: KENYAN_REGIONS.iter().map(|(region, _)| *region).collect(),
    };
    (StatusCode::OK, Json(response))
}

#[utoipa::path(
    get,
    path = "/about",
    tag = "Pages",
    responses(
        (status = 200, description = "About page data", body = AboutResponse)
    )
)]
pub async fn about() -> impl IntoResponse {
    let response = AboutResponse {
        name: "My Nunny",
        mission: "Make finding reliable household help in Kenya simple, safe and fair for both sides.",
        contact_email: "hello@mynunny.example",
    };
    (StatusCode::OK, Json(response))
}

/// Catch-all for unknown paths, mirroring the navigation shell's redirect.
pub async fn redirect_home() -> impl IntoResponse {
    Redirect::to("/")
}

#[cfg(test)]
mod tests {
    use axum::http::header::LOCATION;
    use axum::http::StatusCode;
    use rstest::rstest;
    use tower::ServiceExt;

    use crate::infra::app::create_app;
    use crate::tests::fixtures::init_test_app_state;
    use crate::tests::helpers::{body_json, get_request};

    #[rstest]
    #[tokio::test]
    async fn test_home_lists_services_and_regions() {
        let test_app = init_test_app_state(false);
        let app = create_app(&test_app.state.config, test_app.state.clone());

        let response = app.oneshot(get_request("/")).await.unwrap();
        let status = response.status();
        let body = body_json(response).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "My Nunny");
        assert_eq!(body["services"].as_array().unwrap().len(), 8);
        assert_eq!(body["regions"].as_array().unwrap().len(), 7);
    }

    #[rstest]
    #[tokio::test]
    async fn test_about_page() {
        let test_app = init_test_app_state(false);
        let app = create_app(&test_app.state.config, test_app.state.clone());

        let response = app.oneshot(get_request("/about")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // Unknown paths bounce back to the landing page like the navigation
    // shell's catch-all route.
    #[rstest]
    #[tokio::test]
    async fn test_unknown_path_redirects_home() {
        let test_app = init_test_app_state(false);
        let app = create_app(&test_app.state.config, test_app.state.clone());

        let response = app.oneshot(get_request("/no-such-page")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/");
    }
}
