use std::sync::Arc;

use tracing::info;

use crate::application::app_error::AppResult;
use crate::application::dto::auth::ResendVerificationDTO;
use crate::application::interface::identity::{IdentityProvider, CALLBACK_PATH};

/// Thin passthrough to the provider's resend operation; no local state.
#[derive(Clone)]
pub struct ResendVerificationInteractor {
    provider: Arc<dyn IdentityProvider>,
}

impl ResendVerificationInteractor {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    pub async fn execute(&self, dto: ResendVerificationDTO) -> AppResult<()> {
        let redirect = format!("{}{}", dto.redirect_origin, CALLBACK_PATH);
        self.provider.resend_verification(&dto.email, &redirect).await?;
        info!("Verification email resent to {}", dto.email);
        Ok(())
    }
}
