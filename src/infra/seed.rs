use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::domain::entities::id::Id;
use crate::domain::entities::profile::{Gender, Profile, ProfileDetails};
use crate::domain::entities::service_offer::ServiceOffer;

/// Static seed collections backing the browse dashboards. Fixed anchor
/// timestamps keep the "newest first" ordering deterministic.
fn anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
}

#[allow(clippy::too_many_arguments)]
fn client_profile(
    first_name: &str,
    last_name: &str,
    email: &str,
    gender: Gender,
    id_number: &str,
    region: &str,
    county: &str,
    service_description: &str,
    daily_rate: u32,
    rating: f32,
    review_count: u32,
) -> Profile {
    Profile {
        id: Id::generate(),
        identity_id: Id::generate(),
        email: email.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        gender,
        id_number: id_number.to_string(),
        region: region.to_string(),
        county: county.to_string(),
        profile_picture_url: None,
        id_image_url: None,
        is_verified: true,
        created_at: anchor(),
        rating: Some(rating),
        review_count: Some(review_count),
        details: ProfileDetails::Client {
            service_description: service_description.to_string(),
            daily_rate,
        },
    }
}

#[allow(clippy::too_many_arguments)]
fn nunny_profile(
    first_name: &str,
    last_name: &str,
    email: &str,
    id_number: &str,
    region: &str,
    county: &str,
    days_old: i64,
    phone_number: &str,
    services: &[&str],
    age_range: &str,
    rating: f32,
    review_count: u32,
    picture: &str,
) -> Profile {
    Profile {
        id: Id::generate(),
        identity_id: Id::generate(),
        email: email.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        gender: Gender::Female,
        id_number: id_number.to_string(),
        region: region.to_string(),
        county: county.to_string(),
        profile_picture_url: Some(picture.to_string()),
        id_image_url: None,
        is_verified: true,
        created_at: anchor() - Duration::days(days_old),
        rating: Some(rating),
        review_count: Some(review_count),
        details: ProfileDetails::Nunny {
            phone_number: phone_number.to_string(),
            services: services.iter().map(|s| s.to_string()).collect(),
            age_range: age_range.to_string(),
        },
    }
}

fn offer(client: Profile, description: &str, hours_ago: i64) -> ServiceOffer {
    let (daily_rate, region, county) = match &client.details {
        ProfileDetails::Client { daily_rate, .. } => {
            (*daily_rate, client.region.clone(), client.county.clone())
        }
        ProfileDetails::Nunny { .. } => unreachable!("offers are posted by clients"),
    };
    ServiceOffer {
        id: Id::generate(),
        client_id: client.id.clone(),
        client,
        description: description.to_string(),
        daily_rate,
        region,
        county,
        posted_at: anchor() - Duration::hours(hours_ago),
        is_active: true,
    }
}

pub fn seed_offers() -> Vec<ServiceOffer> {
    vec![
        offer(
            client_profile(
                "Jane",
                "Doe",
                "jane@example.com",
                Gender::Female,
                "12345678",
                "Nairobi",
                "Nairobi",
                "Need a babysitter for my 2 toddlers",
                2000,
                4.5,
                12,
            ),
            "Need a babysitter for my 2 toddlers (ages 2 and 4). Looking for someone experienced and patient. Must be available Monday to Friday, 8 AM to 6 PM.",
            2,
        ),
        offer(
            client_profile(
                "John",
                "Smith",
                "john@example.com",
                Gender::Male,
                "87654321",
                "Central",
                "Kiambu",
                "Weekly house cleaning service needed",
                1500,
                4.8,
                8,
            ),
            "Weekly house cleaning service needed for a 3-bedroom house. Includes general cleaning, laundry, and organizing. Flexible schedule.",
            5,
        ),
        offer(
            client_profile(
                "Mary",
                "Johnson",
                "mary@example.com",
                Gender::Female,
                "11223344",
                "Coastal",
                "Mombasa",
                "Elderly care and cooking assistance",
                2500,
                5.0,
                5,
            ),
            "Looking for someone to help with elderly care and cooking. Must be compassionate, patient, and experienced with elderly care.",
            24,
        ),
        offer(
            client_profile(
                "Peter",
                "Kimani",
                "peter@example.com",
                Gender::Male,
                "22334455",
                "Nairobi",
                "Nairobi",
                "Daily cooking and light cleaning",
                1800,
                4.2,
                15,
            ),
            "Need help with daily cooking and light cleaning. Must be skilled in Kenyan cuisine and available Monday to Saturday.",
            6,
        ),
    ]
}

pub fn seed_nunnies() -> Vec<Profile> {
    vec![
        nunny_profile(
            "Grace",
            "Wanjiku",
            "grace@example.com",
            "12345678",
            "Nairobi",
            "Nairobi",
            30,
            "+254712345678",
            &["Babysitter", "House Cleaning", "Cooking"],
            "26-35",
            4.8,
            24,
            "https://images.pexels.com/photos/1239291/pexels-photo-1239291.jpeg?auto=compress&cs=tinysrgb&w=400&h=400&dpr=2",
        ),
        nunny_profile(
            "Mary",
            "Akinyi",
            "mary@example.com",
            "87654321",
            "Central",
            "Kiambu",
            15,
            "+254723456789",
            &["House Cleaning", "Laundry", "General Cleaning"],
            "36-45",
            4.9,
            18,
            "https://images.pexels.com/photos/1181686/pexels-photo-1181686.jpeg?auto=compress&cs=tinysrgb&w=400&h=400&dpr=2",
        ),
        nunny_profile(
            "Jane",
            "Muthoni",
            "jane@example.com",
            "11223344",
            "Nairobi",
            "Nairobi",
            45,
            "+254734567890",
            &["Babysitter", "Elderly Care", "Cooking"],
            "26-35",
            4.7,
            31,
            "https://images.pexels.com/photos/1181424/pexels-photo-1181424.jpeg?auto=compress&cs=tinysrgb&w=400&h=400&dpr=2",
        ),
        nunny_profile(
            "Esther",
            "Njeri",
            "esther@example.com",
            "22334455",
            "Coastal",
            "Mombasa",
            60,
            "+254745678901",
            &["House Cleaning", "Cooking", "Pet Care"],
            "18-25",
            4.6,
            14,
            "https://images.pexels.com/photos/1181690/pexels-photo-1181690.jpeg?auto=compress&cs=tinysrgb&w=400&h=400&dpr=2",
        ),
        nunny_profile(
            "Faith",
            "Wanjiru",
            "faith@example.com",
            "33445566",
            "Western",
            "Kakamega",
            20,
            "+254756789012",
            &["Babysitter", "House Cleaning", "Laundry", "Gardening"],
            "26-35",
            4.5,
            9,
            "https://images.pexels.com/photos/1181519/pexels-photo-1181519.jpeg?auto=compress&cs=tinysrgb&w=400&h=400&dpr=2",
        ),
        nunny_profile(
            "Susan",
            "Kamau",
            "susan@example.com",
            "44556677",
            "Central",
            "Nyeri",
            10,
            "+254767890123",
            &["Elderly Care", "Cooking", "General Cleaning"],
            "46-55",
            4.9,
            22,
            "https://images.pexels.com/photos/1181562/pexels-photo-1181562.jpeg?auto=compress&cs=tinysrgb&w=400&h=400&dpr=2",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use crate::application::listing::{browse_offers, OfferQuery, OfferSort};
    use crate::infra::seed::{seed_nunnies, seed_offers};

    #[test]
    fn test_seed_shapes() {
        assert_eq!(seed_offers().len(), 4);
        assert_eq!(seed_nunnies().len(), 6);
    }

    #[test]
    fn test_seed_highest_pay_ordering() {
        let query = OfferQuery {
            sort: OfferSort::HighestPay,
            ..Default::default()
        };
        let rates: Vec<u32> = browse_offers(&seed_offers(), &query)
            .iter()
            .map(|o| o.daily_rate)
            .collect();
        assert_eq!(rates, [2500, 2000, 1800, 1500]);
    }
}
