use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct AppInfoResponse {
    pub name: &'static str,
    pub tagline: &'static str,
    pub services: Vec<&'static str>,
    pub regions: Vec<&'static str>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AboutResponse {
    pub name: &'static str,
    pub mission: &'static str,
    pub contact_email: &'static str,
}
