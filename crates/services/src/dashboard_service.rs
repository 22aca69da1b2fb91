use std::sync::Arc;

use tracing::warn;

use campusfit_core::model::{Profile, ProfileCompletion, ResultsReport, TestCompletion};

use crate::api::PlacementApi;
use crate::error::ApiError;

/// What the dashboard shows: the profile plus results when there are any.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardOverview {
    pub profile: Profile,
    pub results: Option<ResultsReport>,
}

impl DashboardOverview {
    #[must_use]
    pub fn profile_completion(&self) -> ProfileCompletion {
        self.profile.completion()
    }

    #[must_use]
    pub fn test_completion(&self) -> TestCompletion {
        self.results
            .as_ref()
            .map(ResultsReport::test_completion)
            .unwrap_or_default()
    }

    /// Resume score on a 0..=10 scale.
    #[must_use]
    pub fn resume_score(&self) -> Option<u8> {
        self.profile.resume_score_out_of_ten()
    }

    #[must_use]
    pub fn placement_ready(&self) -> bool {
        self.results
            .as_ref()
            .is_some_and(ResultsReport::placement_ready)
    }

    /// Overall progress, 0..=100: a quarter each for profile, resume, tests
    /// and readiness. An incomplete profile counts in proportion.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn overall_progress(&self) -> u8 {
        let profile = self.profile_completion();
        let profile_part = if profile.complete {
            25.0
        } else {
            f64::from(profile.percent) * 0.25
        };
        let resume_part = if self.resume_score().is_some_and(|score| score > 0) {
            25.0
        } else {
            0.0
        };
        let tests_part =
            self.test_completion().count() as f64 / TestCompletion::TOTAL as f64 * 25.0;
        let ready_part = if self.placement_ready() { 25.0 } else { 0.0 };
        let total = profile_part + resume_part + tests_part + ready_part;
        total.round().clamp(0.0, 100.0) as u8
    }
}

#[derive(Clone)]
pub struct DashboardService {
    api: Arc<dyn PlacementApi>,
}

impl DashboardService {
    #[must_use]
    pub fn new(api: Arc<dyn PlacementApi>) -> Self {
        Self { api }
    }

    /// Load the profile and, best effort, the results.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the profile cannot be loaded, or if the results
    /// call says the session is no longer authorized.
    pub async fn overview(&self) -> Result<DashboardOverview, ApiError> {
        let profile = self.api.profile().await?;
        let results = match self.api.results().await {
            Ok(results) => Some(results),
            Err(err) if err.is_unauthorized() => return Err(err),
            Err(err) => {
                warn!(error = %err, "results unavailable");
                None
            }
        };
        Ok(DashboardOverview { profile, results })
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the results cannot be loaded.
    pub async fn results(&self) -> Result<ResultsReport, ApiError> {
        self.api.results().await
    }
}
