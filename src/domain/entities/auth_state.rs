use crate::domain::entities::identity::Identity;
use crate::domain::entities::profile::Profile;

/// Reactive current-user value published by the session monitor.
///
/// `Initializing` holds from process start until the first session check
/// resolves; afterwards the state only moves between `Unauthenticated`
/// and `Authenticated` in response to provider events.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthState {
    #[default]
    Initializing,
    Unauthenticated,
    Authenticated {
        identity: Identity,
        /// `None` until the profile row exists (deferred registration).
        profile: Option<Profile>,
    },
}

impl AuthState {
    pub fn is_loading(&self) -> bool {
        matches!(self, AuthState::Initializing)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated { .. })
    }

    pub fn profile(&self) -> Option<&Profile> {
        match self {
            AuthState::Authenticated { profile, .. } => profile.as_ref(),
            _ => None,
        }
    }
}
