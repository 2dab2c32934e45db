use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

pub fn get_request_auth(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

pub fn post_auth(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

pub fn patch_json_auth(uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn nunny_register_payload(email: &str) -> Value {
    json!({
        "first_name": "Grace",
        "last_name": "Wanjiku",
        "gender": "female",
        "email": email,
        "phone_number": "+254712345678",
        "password": "secret1",
        "confirm_password": "secret1",
        "id_number": "12345678",
        "region": "Nairobi",
        "county": "Nairobi",
        "services": ["Babysitter", "House Cleaning"],
        "age_range": "26-35"
    })
}

pub fn client_register_payload(email: &str) -> Value {
    json!({
        "first_name": "Jane",
        "last_name": "Doe",
        "gender": "female",
        "email": email,
        "password": "secret1",
        "confirm_password": "secret1",
        "id_number": "87654321",
        "region": "Nairobi",
        "county": "Nairobi",
        "service_description": "Need a babysitter for my 2 toddlers",
        "daily_rate": "2000"
    })
}

/// Register, verify and log in a client; returns the access token.
pub async fn client_token(app: &Router, provider: &crate::adapter::identity::local::LocalIdentityProvider, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json("/client/register", client_register_payload(email)))
        .await
        .unwrap();
    assert!(response.status().is_success(), "client registration failed");
    provider.complete_verification(email).await.unwrap();
    login_token(app, "/client/login", email).await
}

/// Register, verify and log in a nunny; returns the access token.
pub async fn nunny_token(app: &Router, provider: &crate::adapter::identity::local::LocalIdentityProvider, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json("/nunny/register", nunny_register_payload(email)))
        .await
        .unwrap();
    assert!(response.status().is_success(), "nunny registration failed");
    provider.complete_verification(email).await.unwrap();
    login_token(app, "/nunny/login", email).await
}

pub async fn login_token(app: &Router, path: &str, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            path,
            json!({ "email": email, "password": "secret1" }),
        ))
        .await
        .unwrap();
    assert!(response.status().is_success(), "login failed");
    let json = body_json(response).await;
    json["access_token"].as_str().unwrap().to_string()
}
