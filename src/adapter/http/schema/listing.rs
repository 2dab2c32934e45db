use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::application::listing::{NunnyQuery, NunnySort, NunnyStats, OfferQuery, OfferSort, OfferStats};
use crate::domain::entities::profile::{Profile, ProfileDetails};
use crate::domain::entities::service_offer::ServiceOffer;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct OfferQueryParams {
    pub search: Option<String>,
    pub region: Option<String>,
    pub sort: Option<OfferSort>,
}

impl From<OfferQueryParams> for OfferQuery {
    fn from(params: OfferQueryParams) -> Self {
        OfferQuery {
            search: params.search.unwrap_or_default(),
            region: params.region,
            sort: params.sort.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct NunnyQueryParams {
    pub search: Option<String>,
    pub region: Option<String>,
    pub service: Option<String>,
    pub sort: Option<NunnySort>,
}

impl From<NunnyQueryParams> for NunnyQuery {
    fn from(params: NunnyQueryParams) -> Self {
        NunnyQuery {
            search: params.search.unwrap_or_default(),
            region: params.region,
            service: params.service,
            sort: params.sort.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OfferClientResponse {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub rating: Option<f32>,
    pub review_count: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OfferResponse {
    pub id: Uuid,
    pub description: String,
    pub daily_rate: u32,
    pub region: String,
    pub county: String,
    pub posted_at: DateTime<Utc>,
    pub is_active: bool,
    pub client: OfferClientResponse,
}

impl From<ServiceOffer> for OfferResponse {
    fn from(offer: ServiceOffer) -> Self {
        OfferResponse {
            id: offer.id.value,
            description: offer.description,
            daily_rate: offer.daily_rate,
            region: offer.region,
            county: offer.county,
            posted_at: offer.posted_at,
            is_active: offer.is_active,
            client: OfferClientResponse {
                first_name: offer.client.first_name,
                last_name: offer.client.last_name,
                email: offer.client.email,
                rating: offer.client.rating,
                review_count: offer.client.review_count,
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NunnyCardResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub region: String,
    pub county: String,
    pub services: Vec<String>,
    pub age_range: String,
    pub rating: Option<f32>,
    pub review_count: Option<u32>,
    pub is_verified: bool,
    pub profile_picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Profile> for NunnyCardResponse {
    fn from(profile: Profile) -> Self {
        let (services, age_range) = match profile.details {
            ProfileDetails::Nunny {
                services, age_range, ..
            } => (services, age_range),
            ProfileDetails::Client { .. } => (Vec::new(), String::new()),
        };
        NunnyCardResponse {
            id: profile.id.value,
            first_name: profile.first_name,
            last_name: profile.last_name,
            region: profile.region,
            county: profile.county,
            services,
            age_range,
            rating: profile.rating,
            review_count: profile.review_count,
            is_verified: profile.is_verified,
            profile_picture_url: profile.profile_picture_url,
            created_at: profile.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OfferStatsResponse {
    pub average_daily_rate: u32,
    pub available: usize,
    pub average_client_rating: f32,
}

impl From<OfferStats> for OfferStatsResponse {
    fn from(stats: OfferStats) -> Self {
        OfferStatsResponse {
            average_daily_rate: stats.average_daily_rate,
            available: stats.available,
            average_client_rating: stats.average_client_rating,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NunnyStatsResponse {
    pub available: usize,
    pub average_rating: f32,
    pub verified: usize,
}

impl From<NunnyStats> for NunnyStatsResponse {
    fn from(stats: NunnyStats) -> Self {
        NunnyStatsResponse {
            available: stats.available,
            average_rating: stats.average_rating,
            verified: stats.verified,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NunnyDashboardResponse {
    pub stats: OfferStatsResponse,
    pub offers: Vec<OfferResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClientDashboardResponse {
    pub stats: NunnyStatsResponse,
    pub nunnies: Vec<NunnyCardResponse>,
}
