use std::sync::Arc;

use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::application::interface::db::DBSession;
use crate::domain::entities::id::Id;
use crate::domain::entities::identity::Identity;
use crate::domain::entities::profile::Profile;

#[async_trait]
pub trait ProfileReader: Send + Sync {
    async fn find_by_identity(&self, identity_id: &Id<Identity>) -> AppResult<Option<Profile>>;
}

#[async_trait]
pub trait ProfileWriter: Send + Sync {
    /// Insert a new profile row. Must fail with `AppError::ProfileExists`
    /// when a row for the same identity already exists; callers on the
    /// materialization path treat that as a benign no-op.
    async fn insert(&self, profile: Profile) -> AppResult<Id<Profile>>;

    async fn update(&self, profile: Profile) -> AppResult<Id<Profile>>;
}

/// One unit of work against the profile store.
pub struct ProfileStoreHandle {
    pub session: Arc<dyn DBSession>,
    pub reader: Arc<dyn ProfileReader>,
    pub writer: Arc<dyn ProfileWriter>,
}

/// Opens per-request store handles. The Postgres implementation hands out
/// a lazy transaction per handle; the in-memory one shares a single map.
pub trait ProfileStore: Send + Sync {
    fn open(&self) -> ProfileStoreHandle;
}
