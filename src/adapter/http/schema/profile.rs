use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::dto::profile::UpdateProfileDTO;
use crate::domain::entities::profile::{Gender, Profile, ProfileDetails, ProfileKind};

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub id_number: String,
    pub region: String,
    pub county: String,
    pub profile_picture_url: Option<String>,
    pub id_image_url: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub rating: Option<f32>,
    pub review_count: Option<u32>,
    pub user_type: ProfileKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_rate: Option<u32>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        let user_type = profile.kind();
        let (phone_number, services, age_range, service_description, daily_rate) = match profile.details {
            ProfileDetails::Nunny {
                phone_number,
                services,
                age_range,
            } => (Some(phone_number), Some(services), Some(age_range), None, None),
            ProfileDetails::Client {
                service_description,
                daily_rate,
            } => (None, None, None, Some(service_description), Some(daily_rate)),
        };
        ProfileResponse {
            id: profile.id.value,
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            gender: profile.gender,
            id_number: profile.id_number,
            region: profile.region,
            county: profile.county,
            profile_picture_url: profile.profile_picture_url,
            id_image_url: profile.id_image_url,
            is_verified: profile.is_verified,
            created_at: profile.created_at,
            rating: profile.rating,
            review_count: profile.review_count,
            user_type,
            phone_number,
            services,
            age_range,
            service_description,
            daily_rate,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub region: Option<String>,
    pub county: Option<String>,
    pub profile_picture_url: Option<String>,
    pub phone_number: Option<String>,
    pub services: Option<Vec<String>>,
    pub age_range: Option<String>,
    pub service_description: Option<String>,
    pub daily_rate: Option<u32>,
}

impl From<UpdateProfileRequest> for UpdateProfileDTO {
    fn from(request: UpdateProfileRequest) -> Self {
        UpdateProfileDTO {
            first_name: request.first_name,
            last_name: request.last_name,
            gender: request.gender,
            region: request.region,
            county: request.county,
            profile_picture_url: request.profile_picture_url,
            phone_number: request.phone_number,
            services: request.services,
            age_range: request.age_range,
            service_description: request.service_description,
            daily_rate: request.daily_rate,
        }
    }
}
