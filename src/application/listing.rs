use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::entities::profile::{Profile, ProfileDetails};
use crate::domain::entities::service_offer::ServiceOffer;

/// Filtering and ordering of the browse dashboards. Everything here is a
/// pure function of (collection, query); all sorts are stable so equal
/// keys keep their input order.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OfferSort {
    #[default]
    Newest,
    HighestPay,
    Rating,
}

#[derive(Debug, Clone, Default)]
pub struct OfferQuery {
    pub search: String,
    pub region: Option<String>,
    pub sort: OfferSort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NunnySort {
    #[default]
    Rating,
    Newest,
    Name,
}

#[derive(Debug, Clone, Default)]
pub struct NunnyQuery {
    pub search: String,
    pub region: Option<String>,
    pub service: Option<String>,
    pub sort: NunnySort,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OfferStats {
    pub average_daily_rate: u32,
    pub available: usize,
    pub average_client_rating: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NunnyStats {
    pub available: usize,
    pub average_rating: f32,
    pub verified: usize,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn offer_matches(offer: &ServiceOffer, query: &OfferQuery) -> bool {
    let needle = query.search.to_lowercase();
    let matches_search = needle.is_empty()
        || contains_ci(&offer.description, &needle)
        || contains_ci(&offer.region, &needle)
        || contains_ci(&offer.county, &needle)
        || contains_ci(&offer.client.first_name, &needle)
        || contains_ci(&offer.client.last_name, &needle);
    let matches_region = match &query.region {
        Some(region) if !region.is_empty() => &offer.region == region,
        _ => true,
    };
    matches_search && matches_region
}

pub fn browse_offers(offers: &[ServiceOffer], query: &OfferQuery) -> Vec<ServiceOffer> {
    let mut filtered: Vec<ServiceOffer> = offers.iter().filter(|o| offer_matches(o, query)).cloned().collect();
    match query.sort {
        OfferSort::HighestPay => filtered.sort_by(|a, b| b.daily_rate.cmp(&a.daily_rate)),
        OfferSort::Rating => filtered.sort_by(|a, b| {
            b.client
                .rating
                .unwrap_or(0.0)
                .total_cmp(&a.client.rating.unwrap_or(0.0))
        }),
        OfferSort::Newest => filtered.sort_by(|a, b| b.posted_at.cmp(&a.posted_at)),
    }
    filtered
}

pub fn offer_stats(all: &[ServiceOffer], visible: &[ServiceOffer]) -> OfferStats {
    let average_daily_rate = if all.is_empty() {
        0
    } else {
        (all.iter().map(|o| o.daily_rate as u64).sum::<u64>() / all.len() as u64) as u32
    };
    let average_client_rating = if all.is_empty() {
        0.0
    } else {
        all.iter().map(|o| o.client.rating.unwrap_or(0.0)).sum::<f32>() / all.len() as f32
    };
    OfferStats {
        average_daily_rate,
        available: visible.len(),
        average_client_rating,
    }
}

fn nunny_services(profile: &Profile) -> &[String] {
    match &profile.details {
        ProfileDetails::Nunny { services, .. } => services,
        ProfileDetails::Client { .. } => &[],
    }
}

fn nunny_matches(profile: &Profile, query: &NunnyQuery) -> bool {
    let needle = query.search.to_lowercase();
    let matches_search = needle.is_empty()
        || contains_ci(&profile.first_name, &needle)
        || contains_ci(&profile.last_name, &needle)
        || nunny_services(profile).iter().any(|s| contains_ci(s, &needle))
        || contains_ci(&profile.region, &needle)
        || contains_ci(&profile.county, &needle);
    let matches_region = match &query.region {
        Some(region) if !region.is_empty() => &profile.region == region,
        _ => true,
    };
    let matches_service = match &query.service {
        Some(service) if !service.is_empty() => nunny_services(profile).iter().any(|s| s == service),
        _ => true,
    };
    matches_search && matches_region && matches_service
}

pub fn browse_nunnies(nunnies: &[Profile], query: &NunnyQuery) -> Vec<Profile> {
    let mut filtered: Vec<Profile> = nunnies.iter().filter(|n| nunny_matches(n, query)).cloned().collect();
    match query.sort {
        NunnySort::Rating => {
            filtered.sort_by(|a, b| b.rating.unwrap_or(0.0).total_cmp(&a.rating.unwrap_or(0.0)))
        }
        NunnySort::Newest => filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        NunnySort::Name => {
            filtered.sort_by(|a, b| a.first_name.to_lowercase().cmp(&b.first_name.to_lowercase()))
        }
    }
    filtered
}

pub fn nunny_stats(all: &[Profile], visible: &[Profile]) -> NunnyStats {
    let average_rating = if all.is_empty() {
        0.0
    } else {
        all.iter().map(|n| n.rating.unwrap_or(0.0)).sum::<f32>() / all.len() as f32
    };
    NunnyStats {
        available: visible.len(),
        average_rating,
        verified: all.iter().filter(|n| n.is_verified).count(),
    }
}
