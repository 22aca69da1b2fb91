use std::sync::Arc;

use tracing::info;

use storage::repository::Storage;

use crate::api::{HttpPlacementApi, PlacementApi};
use crate::assessments::AssessmentService;
use crate::auth_service::AuthService;
use crate::dashboard_service::DashboardService;
use crate::error::AppServicesError;
use crate::profile_service::ProfileService;
use crate::resume_service::ResumeService;
use crate::settings_service::SettingsService;

/// Assembles app-facing services around one API client and one store.
#[derive(Clone)]
pub struct AppServices {
    settings: Arc<SettingsService>,
    auth: Arc<AuthService>,
    profile: Arc<ProfileService>,
    dashboard: Arc<DashboardService>,
    assessments: Arc<AssessmentService>,
    resume: Arc<ResumeService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the HTTP API.
    ///
    /// `api_base_url` wins over the stored base URL, which wins over the
    /// built-in default. An explicit URL is stored for later launches.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the
    /// resolved base URL is invalid.
    pub async fn new_sqlite(
        db_url: &str,
        api_base_url: Option<&str>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let settings = Arc::new(SettingsService::new(Arc::clone(&storage.settings)));
        let base_url = resolve_api_base_url(&settings, api_base_url).await?;
        info!(%base_url, "using placement API");

        let api: Arc<dyn PlacementApi> = Arc::new(HttpPlacementApi::new(
            &base_url,
            Arc::clone(&storage.settings),
        )?);
        Ok(Self::assemble(api, settings))
    }

    /// Wire services around any API and store; used by tests and previews.
    #[must_use]
    pub fn from_parts(api: Arc<dyn PlacementApi>, storage: &Storage) -> Self {
        let settings = Arc::new(SettingsService::new(Arc::clone(&storage.settings)));
        Self::assemble(api, settings)
    }

    fn assemble(api: Arc<dyn PlacementApi>, settings: Arc<SettingsService>) -> Self {
        Self {
            auth: Arc::new(AuthService::new(Arc::clone(&api), Arc::clone(&settings))),
            profile: Arc::new(ProfileService::new(Arc::clone(&api))),
            dashboard: Arc::new(DashboardService::new(Arc::clone(&api))),
            assessments: Arc::new(AssessmentService::new(
                Arc::clone(&api),
                Arc::clone(&settings),
            )),
            resume: Arc::new(ResumeService::new(api)),
            settings,
        }
    }

    /// Replace the assessment service, e.g. to shorten the test duration.
    #[must_use]
    pub fn with_assessments(mut self, assessments: AssessmentService) -> Self {
        self.assessments = Arc::new(assessments);
        self
    }

    #[must_use]
    pub fn settings(&self) -> Arc<SettingsService> {
        Arc::clone(&self.settings)
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn profile(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profile)
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    #[must_use]
    pub fn assessments(&self) -> Arc<AssessmentService> {
        Arc::clone(&self.assessments)
    }

    #[must_use]
    pub fn resume(&self) -> Arc<ResumeService> {
        Arc::clone(&self.resume)
    }
}

/// Flag/env URL first (remembered for next time), then the stored URL, then the default.
async fn resolve_api_base_url(
    settings: &SettingsService,
    explicit: Option<&str>,
) -> Result<String, AppServicesError> {
    let resolved = match explicit {
        Some(url) => settings.remember_api_base_url(url).await?,
        None => settings.load().await?,
    };
    Ok(resolved.effective_api_base_url().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusfit_core::model::DEFAULT_API_BASE_URL;
    use storage::repository::InMemoryRepository;

    #[tokio::test]
    async fn explicit_url_is_reused_on_the_next_launch() {
        let settings = SettingsService::new(Arc::new(InMemoryRepository::new()));

        let first = resolve_api_base_url(&settings, None).await.unwrap();
        assert_eq!(first, DEFAULT_API_BASE_URL);

        let flagged = resolve_api_base_url(&settings, Some("https://placements.example.edu/api/"))
            .await
            .unwrap();
        assert_eq!(flagged, "https://placements.example.edu/api");

        let next_launch = resolve_api_base_url(&settings, None).await.unwrap();
        assert_eq!(next_launch, "https://placements.example.edu/api");
    }

    #[tokio::test]
    async fn invalid_explicit_url_is_rejected() {
        let settings = SettingsService::new(Arc::new(InMemoryRepository::new()));
        let err = resolve_api_base_url(&settings, Some("not a url")).await;
        assert!(matches!(err, Err(AppServicesError::Settings(_))));
        assert_eq!(
            resolve_api_base_url(&settings, None).await.unwrap(),
            DEFAULT_API_BASE_URL
        );
    }
}
