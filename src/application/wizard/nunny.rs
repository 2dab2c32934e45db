use serde::Deserialize;

use crate::application::wizard::{is_email_shaped, is_kenyan_phone, FieldErrors};
use crate::domain::entities::profile::{Gender, ProfileDetails, ProfileDraft};

/// Draft owned by the three-step nunny registration wizard.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NunnyForm {
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    PersonalInfo,
    AccountLocation,
    ServicesProfile,
}

pub fn validate_personal_info(form: &NunnyForm) -> FieldErrors {
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
    if form.phone_number.trim().is_empty() {
        errors.insert("phone_number".to_string(), "Phone number is required".to_string());
    } else if !is_kenyan_phone(&form.phone_number) {
        errors.insert("phone_number".to_string(), "Invalid Kenyan phone number".to_string());
    }
    errors
}

pub fn validate_account_location(form: &NunnyForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
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
    errors
}

pub fn validate_services_profile(form: &NunnyForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if form.services.is_empty() {
        errors.insert("services".to_string(), "Please select at least one service".to_string());
    }
    if form.age_range.is_empty() {
        errors.insert("age_range".to_string(), "Age range is required".to_string());
    }
    errors
}

pub fn validate_all(form: &NunnyForm) -> FieldErrors {
    let mut errors = validate_personal_info(form);
    errors.extend(validate_account_location(form));
    errors.extend(validate_services_profile(form));
    errors
}

/// Linear three-step flow: forward movement is gated on the current step
/// validating clean, backward movement is unconditional, and submit only
/// works from the final step after re-validating it.
#[derive(Debug, Clone)]
pub struct NunnyWizard {
    pub step: Step,
    pub form: NunnyForm,
    pub errors: FieldErrors,
}

impl NunnyWizard {
    pub fn new(form: NunnyForm) -> Self {
        Self {
            step: Step::PersonalInfo,
            form,
            errors: FieldErrors::new(),
        }
    }

    fn validate_current(&self) -> FieldErrors {
        match self.step {
            Step::PersonalInfo => validate_personal_info(&self.form),
            Step::AccountLocation => validate_account_location(&self.form),
            Step::ServicesProfile => validate_services_profile(&self.form),
        }
    }

    pub fn next(&mut self) -> bool {
        self.errors = self.validate_current();
        if !self.errors.is_empty() {
            return false;
        }
        self.step = match self.step {
            Step::PersonalInfo => Step::AccountLocation,
            Step::AccountLocation => Step::ServicesProfile,
            Step::ServicesProfile => Step::ServicesProfile,
        };
        true
    }

    pub fn back(&mut self) {
        self.step = match self.step {
            Step::PersonalInfo => Step::PersonalInfo,
            Step::AccountLocation => Step::PersonalInfo,
            Step::ServicesProfile => Step::AccountLocation,
        };
    }

    pub fn submit(&mut self) -> Option<ProfileDraft> {
        if self.step != Step::ServicesProfile {
            return None;
        }
        self.errors = self.validate_current();
        if !self.errors.is_empty() {
            return None;
        }
        Some(draft_from_form(&self.form))
    }
}

pub fn draft_from_form(form: &NunnyForm) -> ProfileDraft {
    ProfileDraft {
        email: form.email.clone(),
        first_name: form.first_name.clone(),
        last_name: form.last_name.clone(),
        gender: form.gender.unwrap_or(Gender::Other),
        id_number: form.id_number.clone(),
        region: form.region.clone(),
        county: form.county.clone(),
        profile_picture_url: form.profile_picture_url.clone(),
        id_image_url: form.id_image_url.clone(),
        details: ProfileDetails::Nunny {
            phone_number: form.phone_number.clone(),
            services: form.services.clone(),
            age_range: form.age_range.clone(),
        },
    }
}
