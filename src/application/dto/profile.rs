use crate::domain::entities::profile::Gender;

/// Partial update submitted against the current profile. Fields belonging
/// to the other discriminator group are carried here but silently dropped
/// by the interactor when they do not match the stored profile's kind.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileDTO {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub region: Option<String>,
    pub county: Option<String>,
    pub profile_picture_url: Option<String>,
    // nunny group
    pub phone_number: Option<String>,
    pub services: Option<Vec<String>>,
    pub age_range: Option<String>,
    // client group
    pub service_description: Option<String>,
    pub daily_rate: Option<u32>,
}
