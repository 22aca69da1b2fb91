use std::sync::Arc;

use tracing::{debug, info, warn};

use campusfit_core::assessment::{AssessmentSession, DEFAULT_TEST_DURATION_SECS};
use campusfit_core::model::{Category, Submission};

use super::loader::QuestionLoader;
use crate::api::PlacementApi;
use crate::error::AssessmentServiceError;
use crate::settings_service::SettingsService;

/// Opens, starts and submits timed tests.
#[derive(Clone)]
pub struct AssessmentService {
    loader: QuestionLoader,
    api: Arc<dyn PlacementApi>,
    settings: Arc<SettingsService>,
    duration_secs: u32,
}

impl AssessmentService {
    #[must_use]
    pub fn new(api: Arc<dyn PlacementApi>, settings: Arc<SettingsService>) -> Self {
        Self {
            loader: QuestionLoader::new(Arc::clone(&api)),
            api,
            settings,
            duration_secs: DEFAULT_TEST_DURATION_SECS,
        }
    }

    #[must_use]
    pub fn with_duration(mut self, duration_secs: u32) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    /// Load questions and build a session.
    ///
    /// Returns `None` when no questions could be loaded. When the
    /// instructions were already dismissed once, the session comes back
    /// already running.
    pub async fn open(&self, category: Category) -> Option<AssessmentSession> {
        let questions = self.loader.load(category).await;
        let mut session =
            AssessmentSession::with_duration(category, questions, self.duration_secs).ok()?;
        if self.instructions_seen().await {
            if let Err(err) = session.start() {
                debug!(%category, error = %err, "session was not waiting on instructions");
            } else {
                debug!(%category, "instructions already seen, session started");
            }
        }
        Some(session)
    }

    /// Leave the instructions screen and remember that it was seen.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentServiceError::Session` if the session already
    /// started.
    pub async fn start(&self, session: &mut AssessmentSession) -> Result<(), AssessmentServiceError> {
        session.start()?;
        if let Err(err) = self.settings.mark_instructions_seen().await {
            warn!(error = %err, "could not remember dismissed instructions");
        }
        info!(category = %session.category(), "assessment started");
        Ok(())
    }

    /// Send the one submission a session produces.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentServiceError::Api` if the server call fails.
    pub async fn submit(&self, submission: &Submission) -> Result<(), AssessmentServiceError> {
        info!(
            category = %submission.category,
            trigger = ?submission.trigger,
            answered = submission.answered_count(),
            total = submission.answers.len(),
            "submitting assessment"
        );
        self.api.submit_test(submission).await?;
        Ok(())
    }

    async fn instructions_seen(&self) -> bool {
        match self.settings.load().await {
            Ok(settings) => settings.seen_test_instructions(),
            Err(err) => {
                warn!(error = %err, "could not read settings, showing instructions");
                false
            }
        }
    }
}
