use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::entities::id::Id;

/// Authentication principal as known to the external identity provider.
/// The provider owns credentials, verification tokens and session issuance;
/// this side only ever reads the record.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub id: Id<Identity>,
    pub email: String,
    pub email_confirmed_at: Option<DateTime<Utc>>,
    /// Opaque metadata bag attached at sign-up. Carries the serialized
    /// profile draft until it is materialized into the profile store.
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}

impl Identity {
    pub fn new(email: String, metadata: Value) -> Self {
        Self {
            id: Id::generate(),
            email,
            email_confirmed_at: None,
            metadata,
            created_at: Utc::now(),
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.email_confirmed_at.is_some()
    }
}

/// An access token coupled with the identity it authenticates.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSession {
    pub access_token: String,
    pub identity: Identity,
}
