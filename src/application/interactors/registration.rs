use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::auth::{RegisterDTO, RegisterOutcomeDTO};
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::profile::ProfileWriter;
use crate::application::interface::identity::{IdentityProvider, CALLBACK_PATH};
use crate::domain::entities::identity::Identity;
use crate::domain::entities::profile::ProfileDraft;

/// Write the profile row carried in the identity metadata bag, if any.
///
/// Idempotent under retries: a uniqueness violation from the store means a
/// concurrent caller already materialized the row, which is not an error.
/// Returns true when a row exists afterwards.
pub(crate) async fn materialize_profile(
    profile_writer: &Arc<dyn ProfileWriter>,
    identity: &Identity,
) -> AppResult<bool> {
    let draft = match serde_json::from_value::<ProfileDraft>(identity.metadata.clone()) {
        Ok(draft) => draft,
        Err(_) => {
            warn!("No registration draft in metadata for {}", identity.email);
            return Ok(false);
        }
    };
    match profile_writer.insert(draft.into_profile(identity.id.clone())).await {
        Ok(_) => {
            info!("Materialized profile for {}", identity.email);
            Ok(true)
        }
        Err(AppError::ProfileExists) => {
            debug!("Profile for {} already materialized", identity.email);
            Ok(true)
        }
        Err(err) => Err(err),
    }
}

#[derive(Clone)]
pub struct RegisterInteractor {
    db_session: Arc<dyn DBSession>,
    profile_writer: Arc<dyn ProfileWriter>,
    provider: Arc<dyn IdentityProvider>,
}

impl RegisterInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        profile_writer: Arc<dyn ProfileWriter>,
        provider: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            db_session,
            profile_writer,
            provider,
        }
    }

    pub async fn execute(&self, dto: RegisterDTO) -> AppResult<RegisterOutcomeDTO> {
        let metadata = serde_json::to_value(&dto.draft)?;
        let redirect = format!("{}{}", dto.redirect_origin, CALLBACK_PATH);
        let identity = self
            .provider
            .sign_up(&dto.draft.email, &dto.password, metadata, &redirect)
            .await?;
        if !identity.is_confirmed() {
            info!("Registered {}; profile deferred until email verification", identity.email);
            return Ok(RegisterOutcomeDTO {
                requires_verification: true,
            });
        }
        materialize_profile(&self.profile_writer, &identity).await?;
        self.db_session.commit().await?;
        info!("Registered {} with a pre-verified email", identity.email);
        Ok(RegisterOutcomeDTO {
            requires_verification: false,
        })
    }
}

/// Lands the email-verification redirect: confirms a session exists and,
/// since this is the first verified contact for the deferred path, runs
/// the same idempotent materialization as login.
#[derive(Clone)]
pub struct CompleteVerificationInteractor {
    db_session: Arc<dyn DBSession>,
    profile_writer: Arc<dyn ProfileWriter>,
    provider: Arc<dyn IdentityProvider>,
}

impl CompleteVerificationInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        profile_writer: Arc<dyn ProfileWriter>,
        provider: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            db_session,
            profile_writer,
            provider,
        }
    }

    /// Returns the verified identity's email, or None when no verified
    /// session landed.
    pub async fn execute(&self) -> AppResult<Option<String>> {
        let Some(session) = self.provider.current_session().await? else {
            return Ok(None);
        };
        if !session.identity.is_confirmed() {
            return Ok(None);
        }
        if materialize_profile(&self.profile_writer, &session.identity).await? {
            self.db_session.commit().await?;
        }
        info!("Email verified for {}", session.identity.email);
        Ok(Some(session.identity.email))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::Utc;
    use mockall::mock;
    use rstest::{fixture, rstest};
    use serde_json::Value;
    use tokio::sync::broadcast;

    use crate::application::app_error::{AppError, AppResult};
    use crate::application::dto::auth::RegisterDTO;
    use crate::application::interactors::registration::{
        CompleteVerificationInteractor, RegisterInteractor,
    };
    use crate::application::interface::db::DBSession;
    use crate::application::interface::gateway::profile::ProfileWriter;
    use crate::application::interface::identity::{AuthEvent, IdentityProvider};
    use crate::domain::entities::id::Id;
    use crate::domain::entities::identity::{Identity, ProviderSession};
    use crate::domain::entities::profile::{Gender, Profile, ProfileDetails, ProfileDraft};

    mock! {
        pub DBSessionMock {}

        #[async_trait]
        impl DBSession for DBSessionMock {
            async fn commit(&self) -> AppResult<()>;
        }
    }

    mock! {
        pub ProfileWriterMock {}

        #[async_trait]
        impl ProfileWriter for ProfileWriterMock {
            async fn insert(&self, profile: Profile) -> AppResult<Id<Profile>>;
            async fn update(&self, profile: Profile) -> AppResult<Id<Profile>>;
        }
    }

    mock! {
        pub ProviderMock {}

        #[async_trait]
        impl IdentityProvider for ProviderMock {
            async fn sign_up(
                &self,
                email: &str,
                password: &str,
                metadata: Value,
                redirect_to: &str,
            ) -> AppResult<Identity>;
            async fn sign_in(&self, email: &str, password: &str) -> AppResult<ProviderSession>;
            async fn sign_out(&self, access_token: &str) -> AppResult<()>;
            async fn current_session(&self) -> AppResult<Option<ProviderSession>>;
            async fn identity_by_token(&self, access_token: &str) -> AppResult<Option<Identity>>;
            fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
            async fn resend_verification(&self, email: &str, redirect_to: &str) -> AppResult<()>;
            async fn send_password_reset(&self, email: &str, redirect_to: &str) -> AppResult<()>;
        }
    }

    fn sample_draft() -> ProfileDraft {
        ProfileDraft {
            email: "grace@example.com".to_string(),
            first_name: "Grace".to_string(),
            last_name: "Wanjiku".to_string(),
            gender: Gender::Female,
            id_number: "12345678".to_string(),
            region: "Nairobi".to_string(),
            county: "Nairobi".to_string(),
            profile_picture_url: None,
            id_image_url: None,
            details: ProfileDetails::Nunny {
                phone_number: "+254712345678".to_string(),
                services: vec!["Babysitter".to_string()],
                age_range: "26-35".to_string(),
            },
        }
    }

    #[fixture]
    fn register_dto() -> RegisterDTO {
        RegisterDTO {
            draft: sample_draft(),
            password: "secret1".to_string(),
            redirect_origin: "http://localhost:8080".to_string(),
        }
    }

    fn identity_from_metadata(metadata: Value, confirmed: bool) -> Identity {
        let mut identity = Identity::new("grace@example.com".to_string(), metadata);
        if confirmed {
            identity.email_confirmed_at = Some(Utc::now());
        }
        identity
    }

    #[rstest]
    #[tokio::test]
    async fn test_register_unverified_defers_profile(register_dto: RegisterDTO) {
        let db_session = MockDBSessionMock::new();
        // No insert expectation: a deferred registration must not touch the store.
        let writer = MockProfileWriterMock::new();
        let mut provider = MockProviderMock::new();

        provider
            .expect_sign_up()
            .withf(|email, _, metadata, redirect| {
                email == "grace@example.com"
                    && metadata["user_type"] == "nunny"
                    && redirect == "http://localhost:8080/auth/callback"
            })
            .returning(|_, _, metadata, _| Ok(identity_from_metadata(metadata, false)));

        let interactor =
            RegisterInteractor::new(Arc::new(db_session), Arc::new(writer), Arc::new(provider));

        let outcome = interactor.execute(register_dto).await.unwrap();
        assert!(outcome.requires_verification);
    }

    #[rstest]
    #[tokio::test]
    async fn test_register_preverified_materializes_immediately(register_dto: RegisterDTO) {
        let mut db_session = MockDBSessionMock::new();
        let mut writer = MockProfileWriterMock::new();
        let mut provider = MockProviderMock::new();

        provider
            .expect_sign_up()
            .returning(|_, _, metadata, _| Ok(identity_from_metadata(metadata, true)));
        writer
            .expect_insert()
            .withf(|profile| profile.first_name == "Grace")
            .times(1)
            .returning(|profile| Ok(profile.id));
        db_session.expect_commit().times(1).returning(|| Ok(()));

        let interactor =
            RegisterInteractor::new(Arc::new(db_session), Arc::new(writer), Arc::new(provider));

        let outcome = interactor.execute(register_dto).await.unwrap();
        assert!(!outcome.requires_verification);
    }

    #[rstest]
    #[tokio::test]
    async fn test_register_surfaces_provider_rejection_verbatim(register_dto: RegisterDTO) {
        let db_session = MockDBSessionMock::new();
        let writer = MockProfileWriterMock::new();
        let mut provider = MockProviderMock::new();

        provider
            .expect_sign_up()
            .returning(|_, _, _, _| Err(AppError::ProviderRejected("User already registered".to_string())));

        let interactor =
            RegisterInteractor::new(Arc::new(db_session), Arc::new(writer), Arc::new(provider));

        let err = interactor.execute(register_dto).await.unwrap_err();
        match err {
            AppError::ProviderRejected(message) => assert_eq!(message, "User already registered"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_callback_without_session_reports_none() {
        let db_session = MockDBSessionMock::new();
        let writer = MockProfileWriterMock::new();
        let mut provider = MockProviderMock::new();
        provider.expect_current_session().returning(|| Ok(None));

        let interactor = CompleteVerificationInteractor::new(
            Arc::new(db_session),
            Arc::new(writer),
            Arc::new(provider),
        );

        assert_eq!(interactor.execute().await.unwrap(), None);
    }

    #[rstest]
    #[tokio::test]
    async fn test_callback_materializes_deferred_profile() {
        let mut db_session = MockDBSessionMock::new();
        let mut writer = MockProfileWriterMock::new();
        let mut provider = MockProviderMock::new();

        provider.expect_current_session().returning(|| {
            let metadata = serde_json::to_value(sample_draft()).unwrap();
            Ok(Some(ProviderSession {
                access_token: "token".to_string(),
                identity: identity_from_metadata(metadata, true),
            }))
        });
        writer.expect_insert().times(1).returning(|profile| Ok(profile.id));
        db_session.expect_commit().times(1).returning(|| Ok(()));

        let interactor = CompleteVerificationInteractor::new(
            Arc::new(db_session),
            Arc::new(writer),
            Arc::new(provider),
        );

        let email = interactor.execute().await.unwrap();
        assert_eq!(email.as_deref(), Some("grace@example.com"));
    }
}
