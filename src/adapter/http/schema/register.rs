use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::wizard::client::ClientForm;
use crate::application::wizard::nunny::NunnyForm;
use crate::domain::entities::profile::Gender;

/// Full output of the three-step nunny wizard, submitted in one request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct NunnyRegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<Gender>,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub confirm_password: String,
    pub id_number: String,
    pub region: String,
    pub county: String,
    pub services: Vec<String>,
    pub age_range: String,
    pub profile_picture_url: Option<String>,
    pub id_image_url: Option<String>,
}

impl From<NunnyRegisterRequest> for NunnyForm {
    fn from(request: NunnyRegisterRequest) -> Self {
        NunnyForm {
            first_name: request.first_name,
            last_name: request.last_name,
            gender: request.gender,
            email: request.email,
            phone_number: request.phone_number,
            password: request.password,
            confirm_password: request.confirm_password,
            id_number: request.id_number,
            region: request.region,
            county: request.county,
            services: request.services,
            age_range: request.age_range,
            profile_picture_url: request.profile_picture_url,
            id_image_url: request.id_image_url,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ClientRegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<Gender>,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub id_number: String,
    pub region: String,
    pub county: String,
    pub service_description: String,
    /// Free text, parsed during validation like the wizard input it is.
    pub daily_rate: String,
    pub profile_picture_url: Option<String>,
    pub id_image_url: Option<String>,
}

impl From<ClientRegisterRequest> for ClientForm {
    fn from(request: ClientRegisterRequest) -> Self {
        ClientForm {
            first_name: request.first_name,
            last_name: request.last_name,
            gender: request.gender,
            email: request.email,
            password: request.password,
            confirm_password: request.confirm_password,
            id_number: request.id_number,
            region: request.region,
            county: request.county,
            service_description: request.service_description,
            daily_rate: request.daily_rate,
            profile_picture_url: request.profile_picture_url,
            id_image_url: request.id_image_url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub requires_verification: bool,
}
