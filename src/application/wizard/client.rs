use serde::Deserialize;

use crate::application::wizard::{is_email_shaped, FieldErrors};
use crate::domain::entities::profile::{Gender, ProfileDetails, ProfileDraft};

/// Draft owned by the single-step client registration form. The daily rate
/// arrives as free text and is only parsed once validation passes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientForm {
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
    pub daily_rate: String,
    pub profile_picture_url: Option<String>,
    pub id_image_url: Option<String>,
}

fn parse_rate(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|rate| *rate > 0)
}

pub fn validate(form: &ClientForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if form.first_name.trim().is_empty() {
        errors.insert("first_name".to_string(), "First name is required".to_string());
    }
    if form.last_name.trim().is_empty() {
        errors.insert("last_name".to_string(), "Last name is required".to_string());
    }
    if form.gender.is_none() {
        errors.insert("gender".to_string(), "Gender is required".to_string());
    }
    if form.email.trim().is_empty() {
        errors.insert("email".to_string(), "Email is required".to_string());
    } else if !is_email_shaped(&form.email) {
        errors.insert("email".to_string(), "Email is invalid".to_string());
    }
    if form.password.is_empty() {
        errors.insert("password".to_string(), "Password is required".to_string());
    } else if form.password.len() < 6 {
        errors.insert(
            "password".to_string(),
            "Password must be at least 6 characters".to_string(),
        );
    }
    if form.password != form.confirm_password {
        errors.insert("confirm_password".to_string(), "Passwords do not match".to_string());
    }
    if form.id_number.trim().is_empty() {
        errors.insert("id_number".to_string(), "ID number is required".to_string());
    }
    if form.region.is_empty() {
        errors.insert("region".to_string(), "Region is required".to_string());
    }
    if form.county.is_empty() {
        errors.insert("county".to_string(), "County is required".to_string());
    }
    if form.service_description.trim().is_empty() {
        errors.insert(
            "service_description".to_string(),
            "Service description is required".to_string(),
        );
    }
    if form.daily_rate.trim().is_empty() {
        errors.insert("daily_rate".to_string(), "Daily rate is required".to_string());
    } else if parse_rate(&form.daily_rate).is_none() {
        errors.insert("daily_rate".to_string(), "Please enter a valid amount".to_string());
    }
    errors
}

/// Validate and shape the form into a draft; `Err` carries the field map.
pub fn submit(form: &ClientForm) -> Result<ProfileDraft, FieldErrors> {
    let errors = validate(form);
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(ProfileDraft {
        email: form.email.clone(),
        first_name: form.first_name.clone(),
        last_name: form.last_name.clone(),
        gender: form.gender.unwrap_or(Gender::Other),
        id_number: form.id_number.clone(),
        region: form.region.clone(),
        county: form.county.clone(),
        profile_picture_url: form.profile_picture_url.clone(),
        id_image_url: form.id_image_url.clone(),
        details: ProfileDetails::Client {
            service_description: form.service_description.clone(),
            daily_rate: parse_rate(&form.daily_rate).expect("validated above"),
        },
    })
}
