use std::sync::Arc;

use tracing::info;

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::profile::UpdateProfileDTO;
use crate::application::interactors::session::SessionMonitor;
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::profile::{ProfileReader, ProfileWriter};
use crate::domain::entities::id::Id;
use crate::domain::entities::identity::Identity;
use crate::domain::entities::profile::{Profile, ProfileDetails};

#[derive(Clone)]
pub struct GetProfileInteractor {
    profile_reader: Arc<dyn ProfileReader>,
}

impl GetProfileInteractor {
    pub fn new(profile_reader: Arc<dyn ProfileReader>) -> Self {
        Self { profile_reader }
    }

    pub async fn execute(&self, identity_id: &Id<Identity>) -> AppResult<Profile> {
        self.profile_reader
            .find_by_identity(identity_id)
            .await?
            .ok_or(AppError::ProfileNotFound)
    }
}

#[derive(Clone)]
pub struct UpdateProfileInteractor {
    db_session: Arc<dyn DBSession>,
    profile_reader: Arc<dyn ProfileReader>,
    profile_writer: Arc<dyn ProfileWriter>,
    monitor: Arc<SessionMonitor>,
}

impl UpdateProfileInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        profile_reader: Arc<dyn ProfileReader>,
        profile_writer: Arc<dyn ProfileWriter>,
        monitor: Arc<SessionMonitor>,
    ) -> Self {
        Self {
            db_session,
            profile_reader,
            profile_writer,
            monitor,
        }
    }

    pub async fn execute(&self, identity_id: &Id<Identity>, dto: UpdateProfileDTO) -> AppResult<Profile> {
        let mut profile = self
            .profile_reader
            .find_by_identity(identity_id)
            .await?
            .ok_or(AppError::NoUserLoggedIn)?;

        apply_common_fields(&mut profile, &dto);
        apply_detail_fields(&mut profile.details, &dto);

        self.profile_writer.update(profile).await?;
        self.db_session.commit().await?;

        // Hand back the stored row, not the optimistic merge.
        let stored = self
            .profile_reader
            .find_by_identity(identity_id)
            .await?
            .ok_or(AppError::ProfileNotFound)?;
        self.monitor.profile_updated(stored.clone());
        info!("Profile updated for {}", stored.email);
        Ok(stored)
    }
}

fn apply_common_fields(profile: &mut Profile, dto: &UpdateProfileDTO) {
    if let Some(first_name) = &dto.first_name {
        profile.first_name = first_name.clone();
    }
    if let Some(last_name) = &dto.last_name {
        profile.last_name = last_name.clone();
    }
    if let Some(gender) = dto.gender {
        profile.gender = gender;
    }
    if let Some(region) = &dto.region {
        profile.region = region.clone();
    }
    if let Some(county) = &dto.county {
        profile.county = county.clone();
    }
    if let Some(url) = &dto.profile_picture_url {
        profile.profile_picture_url = Some(url.clone());
    }
}

/// Merge only the fields of the stored profile's own discriminator group.
/// Fields from the other group are dropped without effect; the
/// discriminator itself never changes.
fn apply_detail_fields(details: &mut ProfileDetails, dto: &UpdateProfileDTO) {
    match details {
        ProfileDetails::Nunny {
            phone_number,
            services,
            age_range,
        } => {
            if let Some(value) = &dto.phone_number {
                *phone_number = value.clone();
            }
            if let Some(value) = &dto.services {
                *services = value.clone();
            }
            if let Some(value) = &dto.age_range {
                *age_range = value.clone();
            }
        }
        ProfileDetails::Client {
            service_description,
            daily_rate,
        } => {
            if let Some(value) = &dto.service_description {
                *service_description = value.clone();
            }
            if let Some(value) = dto.daily_rate {
                *daily_rate = value;
            }
        }
    }
}
