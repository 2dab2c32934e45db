use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::profile::{
    ProfileReader, ProfileStore, ProfileStoreHandle, ProfileWriter,
};
use crate::domain::entities::id::Id;
use crate::domain::entities::identity::Identity;
use crate::domain::entities::profile::Profile;

/// In-memory profile store for development and tests. Keeps the same
/// contract as the Postgres gateway, including the uniqueness guarantee
/// on identity_id.
#[derive(Default)]
pub struct MemoryProfileStore {
    rows: Arc<Mutex<HashMap<Uuid, Profile>>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Clone)]
struct MemoryGateway {
    rows: Arc<Mutex<HashMap<Uuid, Profile>>>,
}

struct NoopSession;

#[async_trait]
impl DBSession for NoopSession {
    async fn commit(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl ProfileReader for MemoryGateway {
    async fn find_by_identity(&self, identity_id: &Id<Identity>) -> AppResult<Option<Profile>> {
        let rows = self.rows.lock().await;
        Ok(rows.get(&identity_id.value).cloned())
    }
}

#[async_trait]
impl ProfileWriter for MemoryGateway {
    async fn insert(&self, profile: Profile) -> AppResult<Id<Profile>> {
        let mut rows = self.rows.lock().await;
        if rows.contains_key(&profile.identity_id.value) {
            return Err(AppError::ProfileExists);
        }
        let id = profile.id.clone();
        rows.insert(profile.identity_id.value, profile);
        Ok(id)
    }

    async fn update(&self, profile: Profile) -> AppResult<Id<Profile>> {
        let mut rows = self.rows.lock().await;
        let row = rows
            .get_mut(&profile.identity_id.value)
            .ok_or(AppError::ProfileNotFound)?;
        let id = profile.id.clone();
        *row = profile;
        Ok(id)
    }
}

impl ProfileStore for MemoryProfileStore {
    fn open(&self) -> ProfileStoreHandle {
        let gateway = MemoryGateway {
            rows: Arc::clone(&self.rows),
        };
        ProfileStoreHandle {
            session: Arc::new(NoopSession),
            reader: Arc::new(gateway.clone()),
            writer: Arc::new(gateway),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::adapter::db::memory::MemoryProfileStore;
    use crate::application::app_error::AppError;
    use crate::application::interface::gateway::profile::ProfileStore;
    use crate::domain::entities::id::Id;
    use crate::domain::entities::profile::{Gender, ProfileDetails, ProfileDraft};

    fn draft() -> ProfileDraft {
        ProfileDraft {
            email: "jane@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            gender: Gender::Female,
            id_number: "12345678".to_string(),
            region: "Nairobi".to_string(),
            county: "Nairobi".to_string(),
            profile_picture_url: None,
            id_image_url: None,
            details: ProfileDetails::Client {
                service_description: "help".to_string(),
                daily_rate: 1500,
            },
        }
    }

    #[tokio::test]
    async fn test_duplicate_identity_insert_rejected() {
        let store = MemoryProfileStore::new();
        let identity_id = Id::generate();
        let handle = store.open();

        handle.writer.insert(draft().into_profile(identity_id.clone())).await.unwrap();
        let err = handle
            .writer
            .insert(draft().into_profile(identity_id.clone()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ProfileExists));

        // Exactly one row survives the race.
        assert!(handle.reader.find_by_identity(&identity_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_rows_shared_across_handles() {
        let store = MemoryProfileStore::new();
        let identity_id = Id::generate();
        store
            .open()
            .writer
            .insert(draft().into_profile(identity_id.clone()))
            .await
            .unwrap();

        let found = store.open().reader.find_by_identity(&identity_id).await.unwrap();
        assert_eq!(found.unwrap().first_name, "Jane");
    }
}
