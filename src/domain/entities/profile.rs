use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::entities::id::Id;
use crate::domain::entities::identity::Identity;

pub const KENYAN_REGIONS: &[(&str, &[&str])] = &[
    ("Western", &["Kakamega", "Vihiga", "Bungoma", "Busia"]),
    ("Nyanza", &["Kisumu", "Siaya", "Kisii", "Nyamira", "Homa Bay", "Migori"]),
    (
        "Rift Valley",
        &[
            "Nakuru",
            "Uasin Gishu",
            "Trans Nzoia",
            "Turkana",
            "West Pokot",
            "Samburu",
            "Baringo",
            "Laikipia",
            "Nandi",
            "Kericho",
            "Bomet",
            "Kajiado",
            "Narok",
        ],
    ),
    ("Nairobi", &["Nairobi"]),
    ("Central", &["Kiambu", "Murang'a", "Nyeri", "Kirinyaga", "Nyandarua"]),
    ("Coastal", &["Mombasa", "Kwale", "Kilifi", "Tana River", "Lamu", "Taita Taveta"]),
    ("North Eastern", &["Garissa", "Wajir", "Mandera"]),
];

pub const SERVICES: &[&str] = &[
    "Babysitter",
    "House Cleaning",
    "Laundry",
    "Cooking",
    "General Cleaning",
    "Elderly Care",
    "Pet Care",
    "Gardening",
];

pub const AGE_RANGES: &[&str] = &["18-25", "26-35", "36-45", "46-55", "55+"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Nunny,
    Client,
}

/// Discriminated field group of a profile. The two variants are mutually
/// exclusive by construction; the discriminator never changes after the
/// row is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "user_type", rename_all = "lowercase")]
pub enum ProfileDetails {
    Nunny {
        phone_number: String,
        services: Vec<String>,
        age_range: String,
    },
    Client {
        service_description: String,
        daily_rate: u32,
    },
}

impl ProfileDetails {
    pub fn kind(&self) -> ProfileKind {
        match self {
            ProfileDetails::Nunny { .. } => ProfileKind::Nunny,
            ProfileDetails::Client { .. } => ProfileKind::Client,
        }
    }
}

/// Application-level user record, one-to-one with a provider identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: Id<Profile>,
    pub identity_id: Id<Identity>,
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
    pub details: ProfileDetails,
}

impl Profile {
    pub fn kind(&self) -> ProfileKind {
        self.details.kind()
    }
}

/// What the registration wizards hand to the workflow. Serialized verbatim
/// into the identity metadata bag when profile creation is deferred until
/// the email is verified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub id_number: String,
    pub region: String,
    pub county: String,
    pub profile_picture_url: Option<String>,
    pub id_image_url: Option<String>,
    #[serde(flatten)]
    pub details: ProfileDetails,
}

impl ProfileDraft {
    pub fn into_profile(self, identity_id: Id<Identity>) -> Profile {
        Profile {
            id: Id::generate(),
            identity_id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            gender: self.gender,
            id_number: self.id_number,
            region: self.region,
            county: self.county,
            profile_picture_url: self.profile_picture_url,
            id_image_url: self.id_image_url,
            is_verified: false,
            created_at: Utc::now(),
            rating: None,
            review_count: None,
            details: self.details,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use crate::domain::entities::id::Id;
    use crate::domain::entities::profile::{Gender, ProfileDetails, ProfileDraft, ProfileKind};

    fn nunny_draft() -> ProfileDraft {
        ProfileDraft {
            email: "grace@example.com".to_string(),
            first_name: "Grace".to_string(),
            last_name: "Wanjiku".to_string(),
            gender: Gender::Female,
            id_number: "12345678".to_string(),
            region: "Nairobi".to_string(),
            county: "Nairobi".to_string(),
            profile_picture_url: None,
            id_image_url: None,
            details: ProfileDetails::Nunny {
                phone_number: "+254712345678".to_string(),
                services: vec!["Babysitter".to_string(), "Cooking".to_string()],
                age_range: "26-35".to_string(),
            },
        }
    }

    #[rstest]
    fn test_draft_roundtrips_through_metadata_bag() {
        let draft = nunny_draft();
        let bag = serde_json::to_value(&draft).unwrap();
        assert_eq!(bag["user_type"], json!("nunny"));
        assert_eq!(bag["phone_number"], json!("+254712345678"));
        let back: ProfileDraft = serde_json::from_value(bag).unwrap();
        assert_eq!(back, draft);
    }

    #[rstest]
    fn test_into_profile_keeps_discriminator() {
        let identity_id = Id::generate();
        let profile = nunny_draft().into_profile(identity_id.clone());
        assert_eq!(profile.kind(), ProfileKind::Nunny);
        assert_eq!(profile.identity_id, identity_id);
        assert!(!profile.is_verified);
        assert!(profile.rating.is_none());
    }

    #[rstest]
    fn test_client_details_serialize_with_own_tag() {
        let details = ProfileDetails::Client {
            service_description: "Weekly house cleaning".to_string(),
            daily_rate: 1500,
        };
        let value = serde_json::to_value(&details).unwrap();
        assert_eq!(value["user_type"], json!("client"));
        assert_eq!(value["daily_rate"], json!(1500));
        assert!(value.get("phone_number").is_none());
    }
}
