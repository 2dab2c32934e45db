use std::sync::Arc;

use tracing::{info, warn};

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::auth::RequestPasswordResetDTO;
use crate::application::interface::identity::{IdentityProvider, RESET_PASSWORD_PATH};

/// Asks the provider to start a password reset. Always resolves
/// success-shaped: whether the address is registered must not be
/// observable, so provider rejections are swallowed after logging.
#[derive(Clone)]
pub struct RequestPasswordResetInteractor {
    provider: Arc<dyn IdentityProvider>,
}

impl RequestPasswordResetInteractor {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    pub async fn execute(&self, dto: RequestPasswordResetDTO) -> AppResult<()> {
        let redirect = format!("{}{}", dto.redirect_origin, RESET_PASSWORD_PATH);
        match self.provider.send_password_reset(&dto.email, &redirect).await {
            Ok(()) => info!("Password reset initiated for {}", dto.email),
            Err(AppError::ProviderRejected(message)) => {
                warn!("Password reset rejected by provider: {}", message);
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use mockall::mock;
    use rstest::rstest;
    use serde_json::Value;
    use tokio::sync::broadcast;

    use crate::application::app_error::{AppError, AppResult};
    use crate::application::dto::auth::RequestPasswordResetDTO;
    use crate::application::interactors::password_reset::RequestPasswordResetInteractor;
    use crate::application::interface::identity::{AuthEvent, IdentityProvider};
    use crate::domain::entities::identity::{Identity, ProviderSession};

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

    fn dto(email: &str) -> RequestPasswordResetDTO {
        RequestPasswordResetDTO {
            email: email.to_string(),
            redirect_origin: "http://localhost:8080".to_string(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_reset_builds_reset_redirect() {
        let mut provider = MockProviderMock::new();
        provider
            .expect_send_password_reset()
            .withf(|email, redirect| {
                email == "grace@example.com"
                    && redirect == "http://localhost:8080/auth/reset-password"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let interactor = RequestPasswordResetInteractor::new(Arc::new(provider));
        assert!(interactor.execute(dto("grace@example.com")).await.is_ok());
    }

    #[rstest]
    #[tokio::test]
    async fn test_unknown_email_still_returns_ok() {
        let mut provider = MockProviderMock::new();
        provider
            .expect_send_password_reset()
            .returning(|_, _| Err(AppError::ProviderRejected("User not found".to_string())));

        let interactor = RequestPasswordResetInteractor::new(Arc::new(provider));
        // Account existence must not leak through the response shape.
        assert!(interactor.execute(dto("nobody@example.com")).await.is_ok());
    }

    #[rstest]
    #[tokio::test]
    async fn test_transport_failure_still_errors() {
        let mut provider = MockProviderMock::new();
        provider
            .expect_send_password_reset()
            .returning(|_, _| Err(AppError::ProviderUnreachable("connection refused".to_string())));

        let interactor = RequestPasswordResetInteractor::new(Arc::new(provider));
        let err = interactor.execute(dto("grace@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::ProviderUnreachable(_)));
    }
}
