use std::sync::Arc;

use tracing::{info, warn};

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::auth::{LoginDTO, SessionDTO};
use crate::application::interactors::registration::materialize_profile;
use crate::application::interactors::session::SessionMonitor;
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::profile::{ProfileReader, ProfileWriter};
use crate::application::interface::identity::IdentityProvider;

#[derive(Clone)]
pub struct LoginInteractor {
    db_session: Arc<dyn DBSession>,
    profile_reader: Arc<dyn ProfileReader>,
    profile_writer: Arc<dyn ProfileWriter>,
    provider: Arc<dyn IdentityProvider>,
    monitor: Arc<SessionMonitor>,
}

impl LoginInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        profile_reader: Arc<dyn ProfileReader>,
        profile_writer: Arc<dyn ProfileWriter>,
        provider: Arc<dyn IdentityProvider>,
        monitor: Arc<SessionMonitor>,
    ) -> Self {
        Self {
            db_session,
            profile_reader,
            profile_writer,
            provider,
            monitor,
        }
    }

    pub async fn execute(&self, dto: LoginDTO) -> AppResult<SessionDTO> {
        let session = self.provider.sign_in(&dto.email, &dto.password).await?;
        if !session.identity.is_confirmed() {
            // Compensating action: the provider issued a session for an
            // unverified identity, so terminate it before rejecting.
            if let Err(err) = self.provider.sign_out(&session.access_token).await {
                warn!("Failed to terminate unverified session for {}: {}", dto.email, err);
            }
            return Err(AppError::EmailNotVerified);
        }
        if self
            .profile_reader
            .find_by_identity(&session.identity.id)
            .await?
            .is_none()
        {
            // Deferred registration: first verified login writes the row.
            materialize_profile(&self.profile_writer, &session.identity).await?;
            self.db_session.commit().await?;
            // The sign-in notification fired before the row existed, so
            // republish from the authoritative stores.
            self.monitor.refresh().await;
        }
        info!("User {} logged in successfully", session.identity.email);
        Ok(SessionDTO {
            access_token: session.access_token,
            identity_id: session.identity.id.value.to_string(),
            email: session.identity.email,
        })
    }
}

#[derive(Clone)]
pub struct LogoutInteractor {
    provider: Arc<dyn IdentityProvider>,
    monitor: Arc<SessionMonitor>,
}

impl LogoutInteractor {
    pub fn new(provider: Arc<dyn IdentityProvider>, monitor: Arc<SessionMonitor>) -> Self {
        Self { provider, monitor }
    }

    pub async fn execute(&self, access_token: &str) -> AppResult<()> {
        self.provider.sign_out(access_token).await?;
        // The reactive state empties through the provider's own sign-out
        // notification; the refresh re-reads the provider so a dropped
        // notification cannot strand a stale identity.
        self.monitor.refresh().await;
        info!("User logged out");
        Ok(())
    }
}
