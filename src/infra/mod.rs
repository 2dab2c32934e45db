use std::sync::Arc;

use crate::adapter::db::gateway::profile::SqlxProfileStore;
use crate::adapter::db::memory::MemoryProfileStore;
use crate::adapter::identity::gotrue::GoTrueIdentityProvider;
use crate::adapter::identity::local::LocalIdentityProvider;
use crate::application::interactors::session::SessionMonitor;
use crate::application::interface::gateway::profile::ProfileStore;
use crate::application::interface::identity::IdentityProvider;
use crate::infra::config::AppConfig;
use crate::infra::db::init_db;
use crate::infra::state::AppState;

pub mod app;
pub mod config;
pub mod db;
pub mod seed;
pub mod setup;
pub mod state;

pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let provider: Arc<dyn IdentityProvider> = match config.identity.backend.as_str() {
        "gotrue" => Arc::new(GoTrueIdentityProvider::new(
            config.identity.base_url.clone(),
            config.identity.api_key.clone(),
        )),
        _ => Arc::new(LocalIdentityProvider::new(config.identity.auto_confirm)),
    };

    let profiles: Arc<dyn ProfileStore> = match config.profile_store.backend.as_str() {
        "postgres" => {
            let pool = init_db(config).await?;
            Arc::new(SqlxProfileStore::new(pool))
        }
        _ => Arc::new(MemoryProfileStore::new()),
    };

    let monitor = Arc::new(SessionMonitor::new(provider.clone(), profiles.clone()));

    Ok(AppState {
        config: Arc::new(config.clone()),
        provider,
        profiles,
        monitor,
    })
}
