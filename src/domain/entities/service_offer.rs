use chrono::{DateTime, Utc};

use crate::domain::entities::id::Id;
use crate::domain::entities::profile::Profile;

/// A client's open request for services. Seeded statically; never created
/// or mutated through the API.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceOffer {
    pub id: Id<ServiceOffer>,
    pub client_id: Id<Profile>,
    /// Snapshot of the posting client at publication time.
    pub client: Profile,
    pub description: String,
    pub daily_rate: u32,
    pub region: String,
    pub county: String,
    pub posted_at: DateTime<Utc>,
    pub is_active: bool,
}
