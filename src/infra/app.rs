use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{self};
use axum::routing::{get, patch, post};
use axum::{middleware, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use uuid::Uuid;

use crate::adapter::http::docs::{docs_ui, openapi_json};
use crate::adapter::http::middleware::auth::{auth_middleware, require_client, require_nunny};
use crate::adapter::http::routes::auth::{
    callback, client_login, forgot_password, logout, nunny_login, resend_verification, session,
};
use crate::adapter::http::routes::dashboard::{client_dashboard, nunny_dashboard};
use crate::adapter::http::routes::pages::{about, home, redirect_home};
use crate::adapter::http::routes::profile::{get_me, update_profile};
use crate::adapter::http::routes::register::{register_client, register_nunny};
use crate::infra::config::AppConfig;
use crate::infra::state::AppState;

fn build_cors(config: &AppConfig) -> CorsLayer {
    let has_wildcard = config.application.allow_origins.iter().any(|s| s == "*");

    if has_wildcard {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([http::Method::POST, http::Method::GET, http::Method::PATCH])
            .allow_headers([CONTENT_TYPE, AUTHORIZATION]);
    }
    let origins: Vec<http::HeaderValue> = config
        .application
        .allow_origins
        .iter()
        .filter_map(|s| {
            s.parse::<http::HeaderValue>()
                .map_err(|e| {
                    tracing::warn!("Failed to parse origin '{}': {}", s, e);
                })
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([http::Method::POST, http::Method::GET, http::Method::PATCH])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}

pub fn pages_router() -> Router<AppState> {
    Router::new().route("/", get(home)).route("/about", get(about))
}

pub fn account_router() -> Router<AppState> {
    Router::new()
        .route("/nunny/register", post(register_nunny))
        .route("/client/register", post(register_client))
        .route("/nunny/login", post(nunny_login))
        .route("/client/login", post(client_login))
}

pub fn auth_router(state: AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/callback", get(callback))
        .route("/resend-verification", post(resend_verification))
        .route("/forgot-password", post(forgot_password))
        .route("/session", get(session));

    let protected_routes = Router::new()
        .route("/logout", post(logout))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));
    Router::new().merge(public_routes).merge(protected_routes)
}

pub fn dashboard_router(state: AppState) -> Router<AppState> {
    let nunny_routes = Router::new()
        .route("/nunny/dashboard", get(nunny_dashboard))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_nunny))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let client_routes = Router::new()
        .route("/client/dashboard", get(client_dashboard))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_client))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new().merge(nunny_routes).merge(client_routes)
}

pub fn profile_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/profile/me", get(get_me))
        .route("/profile", patch(update_profile))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
}

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(pages_router())
        .merge(account_router())
        .nest("/auth", auth_router(state.clone()))
        .merge(dashboard_router(state.clone()))
        .merge(profile_router(state.clone()))
        .route("/openapi.json", get(openapi_json))
        .route("/docs", get(docs_ui))
        .fallback(redirect_home)
}

pub fn create_app(config: &AppConfig, state: AppState) -> Router {
    let cors = build_cors(config);
    Router::new()
        .merge(router(state.clone()))
        .with_state(state.clone())
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &http::Request<_>| {
                    let request_id = Uuid::now_v7();
                    tracing::info_span!(
                        "http-request",
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                        request_id = %request_id
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
