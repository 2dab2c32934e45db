use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::application::app_error::AppResult;
use crate::application::interface::gateway::profile::ProfileStore;
use crate::application::interface::identity::{AuthEvent, IdentityProvider};
use crate::domain::entities::auth_state::AuthState;
use crate::domain::entities::id::Id;
use crate::domain::entities::identity::{Identity, ProviderSession};
use crate::domain::entities::profile::Profile;

/// Publishes the reactive current-user value.
///
/// Starts in `Initializing` and leaves it once the first session check
/// resolves. After that the state only changes in response to provider
/// events (applied strictly in arrival order), an explicit `refresh`, or
/// the post-update profile re-fetch. The monitor is the single writer of
/// the channel; everything else subscribes.
pub struct SessionMonitor {
    provider: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileStore>,
    tx: watch::Sender<AuthState>,
}

impl SessionMonitor {
    pub fn new(provider: Arc<dyn IdentityProvider>, profiles: Arc<dyn ProfileStore>) -> Self {
        let (tx, _) = watch::channel(AuthState::Initializing);
        Self {
            provider,
            profiles,
            tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> AuthState {
        self.tx.borrow().clone()
    }

    /// Resolve the initial session, then keep consuming the provider's
    /// event stream for the life of the process.
    pub async fn bootstrap(self: &Arc<Self>) -> AppResult<()> {
        let initial = self.provider.current_session().await?;
        self.apply_session(initial).await;
        info!("Session monitor initialized");

        let mut events = self.provider.subscribe();
        let monitor = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => monitor.apply_event(event).await,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Auth event stream lagged by {} events, resyncing", skipped);
                        monitor.refresh().await;
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
        Ok(())
    }

    /// Re-read the provider session and republish. Used as the defensive
    /// counterpart to the event stream, e.g. right after a sign-out.
    pub async fn refresh(&self) {
        match self.provider.current_session().await {
            Ok(session) => self.apply_session(session).await,
            Err(err) => warn!("Session refresh failed: {}", err),
        }
    }

    /// Swap the published profile after an update has been re-fetched from
    /// the store. Ignored unless the profile belongs to the identity that
    /// is currently signed in.
    pub fn profile_updated(&self, profile: Profile) {
        self.tx.send_if_modified(|state| match state {
            AuthState::Authenticated {
                identity,
                profile: slot,
            } if identity.id == profile.identity_id => {
                *slot = Some(profile.clone());
                true
            }
            _ => false,
        });
    }

    async fn apply_event(&self, event: AuthEvent) {
        match event {
            AuthEvent::SignedIn(session) => self.apply_session(Some(session)).await,
            AuthEvent::SignedOut => self.apply_session(None).await,
        }
    }

    async fn apply_session(&self, session: Option<ProviderSession>) {
        let next = match session {
            Some(session) if session.identity.is_confirmed() => {
                let profile = self.fetch_profile(&session.identity.id).await;
                AuthState::Authenticated {
                    identity: session.identity,
                    profile,
                }
            }
            _ => AuthState::Unauthenticated,
        };
        self.tx.send_replace(next);
    }

    async fn fetch_profile(&self, identity_id: &Id<Identity>) -> Option<Profile> {
        match self.profiles.open().reader.find_by_identity(identity_id).await {
            Ok(profile) => profile,
            Err(err) => {
                error!("Error fetching profile: {}", err);
                None
            }
        }
    }
}
