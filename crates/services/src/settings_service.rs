use std::sync::Arc;

use campusfit_core::model::{ClientSettings, ClientSettingsDraft};
use storage::repository::SettingsRepository;
use tracing::info;

use crate::error::SettingsServiceError;

#[derive(Clone)]
pub struct SettingsService {
    repo: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    #[must_use]
    pub fn new(repo: Arc<dyn SettingsRepository>) -> Self {
        Self { repo }
    }

    /// Load persisted settings (or defaults if missing).
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` on storage failures.
    pub async fn load(&self) -> Result<ClientSettings, SettingsServiceError> {
        let settings = self.repo.get_settings().await?;
        Ok(settings.unwrap_or_default())
    }

    /// Store an explicitly configured API root so later launches reuse it.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` if the URL is invalid or persistence fails.
    pub async fn remember_api_base_url(
        &self,
        url: &str,
    ) -> Result<ClientSettings, SettingsServiceError> {
        let current = self.load().await?;
        let settings = ClientSettingsDraft {
            api_base_url: Some(url.to_owned()),
            auth_token: current.auth_token().map(str::to_owned),
            seen_test_instructions: current.seen_test_instructions(),
        }
        .validate()?;
        if settings != current {
            self.repo.save_settings(&settings).await?;
            info!(base_url = settings.effective_api_base_url(), "stored API base URL");
        }
        Ok(settings)
    }

    /// Replace the stored bearer token; `None` signs out.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` on storage failures.
    pub async fn store_auth_token(
        &self,
        token: Option<String>,
    ) -> Result<ClientSettings, SettingsServiceError> {
        let settings = self.load().await?.with_auth_token(token);
        self.repo.save_settings(&settings).await?;
        Ok(settings)
    }

    /// # Errors
    ///
    /// Returns `SettingsServiceError` on storage failures.
    pub async fn mark_instructions_seen(&self) -> Result<(), SettingsServiceError> {
        let current = self.load().await?;
        if current.seen_test_instructions() {
            return Ok(());
        }
        self.repo
            .save_settings(&current.with_seen_test_instructions())
            .await?;
        Ok(())
    }
}
