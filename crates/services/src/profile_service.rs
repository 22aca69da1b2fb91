use std::sync::Arc;

use tracing::info;

use campusfit_core::model::{Profile, ProfileDraft};

use crate::api::PlacementApi;
use crate::error::ProfileServiceError;

#[derive(Clone)]
pub struct ProfileService {
    api: Arc<dyn PlacementApi>,
}

impl ProfileService {
    #[must_use]
    pub fn new(api: Arc<dyn PlacementApi>) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns `ProfileServiceError::Api` if the profile cannot be fetched.
    pub async fn load(&self) -> Result<Profile, ProfileServiceError> {
        Ok(self.api.profile().await?)
    }

    /// Validate the form and send it.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Invalid` for bad input (nothing is sent)
    /// and `ProfileServiceError::Api` if the server rejects it.
    pub async fn save(&self, draft: ProfileDraft) -> Result<Profile, ProfileServiceError> {
        let profile = draft.validate()?;
        self.api.save_profile(&profile).await?;
        info!(
            percent = profile.completion().percent,
            "profile saved"
        );
        Ok(profile)
    }
}
