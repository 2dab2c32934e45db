use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapter::http::middleware::extractor::CurrentProfile;
use crate::adapter::http::schema::listing::{
    ClientDashboardResponse, NunnyCardResponse, NunnyDashboardResponse, NunnyQueryParams,
    OfferQueryParams, OfferResponse,
};
use crate::application::listing::{browse_nunnies, browse_offers, nunny_stats, offer_stats};
use crate::infra::seed::{seed_nunnies, seed_offers};

#[utoipa::path(
    get,
    path = "/nunny/dashboard",
    tag = "Dashboard",
    params(OfferQueryParams),
    responses(
        (status = 200, description = "Open client requests for nunnies to browse", body = NunnyDashboardResponse),
        (status = 401, description = "Missing or invalid access token"),
        (status = 403, description = "Signed in with a client account")
    ),
    security(("bearerAuth" = []))
)]
pub async fn nunny_dashboard(
    _profile: CurrentProfile,
    Query(params): Query<OfferQueryParams>,
) -> impl IntoResponse {
    let offers = seed_offers();
    let visible = browse_offers(&offers, &params.into());
    let stats = offer_stats(&offers, &visible);
    let response = NunnyDashboardResponse {
        stats: stats.into(),
        offers: visible.into_iter().map(OfferResponse::from).collect(),
    };
    (StatusCode::OK, Json(response))
}

#[utoipa::path(
    get,
    path = "/client/dashboard",
    tag = "Dashboard",
    params(NunnyQueryParams),
    responses(
        (status = 200, description = "Available nunnies for clients to browse", body = ClientDashboardResponse),
        (status = 401, description = "Missing or invalid access token"),
        (status = 403, description = "Signed in with a nunny account")
    ),
    security(("bearerAuth" = []))
)]
pub async fn client_dashboard(
    _profile: CurrentProfile,
    Query(params): Query<NunnyQueryParams>,
) -> impl IntoResponse {
    let nunnies = seed_nunnies();
    let visible = browse_nunnies(&nunnies, &params.into());
    let stats = nunny_stats(&nunnies, &visible);
    let response = ClientDashboardResponse {
        stats: stats.into(),
        nunnies: visible.into_iter().map(NunnyCardResponse::from).collect(),
    };
    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use rstest::rstest;
    use tower::ServiceExt;

    use crate::infra::app::create_app;
    use crate::tests::fixtures::init_test_app_state;
    use crate::tests::helpers::{body_json, client_token, get_request, get_request_auth, nunny_token};

    #[rstest]
    #[tokio::test]
    async fn test_dashboards_require_authentication() {
        let test_app = init_test_app_state(false);
        let app = create_app(&test_app.state.config, test_app.state.clone());

        for uri in ["/nunny/dashboard", "/client/dashboard"] {
            let response = app.clone().oneshot(get_request(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }
    }

    // Discriminator gating: a client token cannot open the nunny dashboard
    // and vice versa.
    #[rstest]
    #[tokio::test]
    async fn test_dashboards_gated_on_discriminator() {
        let test_app = init_test_app_state(false);
        let app = create_app(&test_app.state.config, test_app.state.clone());

        let client = client_token(&app, &test_app.provider, "jane@example.com").await;
        let nunny = nunny_token(&app, &test_app.provider, "grace@example.com").await;

        let wrong = app
            .clone()
            .oneshot(get_request_auth("/nunny/dashboard", &client))
            .await
            .unwrap();
        assert_eq!(wrong.status(), StatusCode::FORBIDDEN);

        let wrong = app
            .clone()
            .oneshot(get_request_auth("/client/dashboard", &nunny))
            .await
            .unwrap();
        assert_eq!(wrong.status(), StatusCode::FORBIDDEN);

        let right = app
            .clone()
            .oneshot(get_request_auth("/nunny/dashboard", &nunny))
            .await
            .unwrap();
        assert_eq!(right.status(), StatusCode::OK);

        let right = app
            .oneshot(get_request_auth("/client/dashboard", &client))
            .await
            .unwrap();
        assert_eq!(right.status(), StatusCode::OK);
    }

    #[rstest]
    #[tokio::test]
    async fn test_nunny_dashboard_sort_by_highest_pay() {
        let test_app = init_test_app_state(false);
        let app = create_app(&test_app.state.config, test_app.state.clone());
        let token = nunny_token(&app, &test_app.provider, "grace@example.com").await;

        let response = app
            .oneshot(get_request_auth("/nunny/dashboard?sort=highest_pay", &token))
            .await
            .unwrap();
        let status = response.status();
        let body = body_json(response).await;

        assert_eq!(status, StatusCode::OK);
        let rates: Vec<u64> = body["offers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["daily_rate"].as_u64().unwrap())
            .collect();
        assert_eq!(rates, [2500, 2000, 1800, 1500]);
        assert_eq!(body["stats"]["available"], 4);
    }

    // Searching "clean" matches service tags case-insensitively with no
    // region filter set.
    #[rstest]
    #[tokio::test]
    async fn test_client_dashboard_search_by_service_text() {
        let test_app = init_test_app_state(false);
        let app = create_app(&test_app.state.config, test_app.state.clone());
        let token = client_token(&app, &test_app.provider, "jane@example.com").await;

        let response = app
            .oneshot(get_request_auth("/client/dashboard?search=clean", &token))
            .await
            .unwrap();
        let status = response.status();
        let body = body_json(response).await;

        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body["nunnies"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["first_name"].as_str().unwrap())
            .collect();
        // Every seeded nunny with a *Cleaning tag, regardless of region.
        assert_eq!(names.len(), 5);
        assert!(!names.contains(&"Jane"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_client_dashboard_region_and_service_filters() {
        let test_app = init_test_app_state(false);
        let app = create_app(&test_app.state.config, test_app.state.clone());
        let token = client_token(&app, &test_app.provider, "jane@example.com").await;

        let response = app
            .oneshot(get_request_auth(
                "/client/dashboard?region=Central&service=Laundry&sort=name",
                &token,
            ))
            .await
            .unwrap();
        let body = body_json(response).await;

        let names: Vec<&str> = body["nunnies"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["first_name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["Mary"]);
    }
}
