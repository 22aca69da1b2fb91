use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use campusfit_core::model::{
    Category, Profile, Question, ResultsReport, ResumeAnalysis, ResumeUpload, Submission,
};

use super::{Credentials, LoginResponse, PlacementApi, Registration};
use crate::error::ApiError;

/// Simple in-memory API implementation for testing and prototyping.
///
/// Mirrors the server's status codes and `{ error }` messages closely enough
/// for the services and views to take their real error paths.
#[derive(Clone, Default)]
pub struct InMemoryPlacementApi {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    questions: HashMap<Category, Vec<Question>>,
    accounts: HashMap<String, String>,
    submissions: Vec<Submission>,
    uploads: Vec<ResumeUpload>,
    profile: Profile,
    results: Option<ResultsReport>,
    analysis: ResumeAnalysis,
    unavailable: bool,
    submit_latency: Option<Duration>,
}

impl InMemoryPlacementApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_questions(self, category: Category, questions: Vec<Question>) -> Self {
        self.lock().questions.insert(category, questions);
        self
    }

    #[must_use]
    pub fn with_account(self, username: &str, password: &str) -> Self {
        self.lock()
            .accounts
            .insert(username.to_string(), password.to_string());
        self
    }

    #[must_use]
    pub fn with_profile(self, profile: Profile) -> Self {
        self.lock().profile = profile;
        self
    }

    #[must_use]
    pub fn with_results(self, results: ResultsReport) -> Self {
        self.lock().results = Some(results);
        self
    }

    #[must_use]
    pub fn with_analysis(self, analysis: ResumeAnalysis) -> Self {
        self.lock().analysis = analysis;
        self
    }

    /// Make every call fail with `503`, as if the server were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Hold every test submission for `latency` before it is recorded.
    pub fn set_submit_latency(&self, latency: Duration) {
        self.lock().submit_latency = Some(latency);
    }

    #[must_use]
    pub fn submissions(&self) -> Vec<Submission> {
        self.lock().submissions.clone()
    }

    #[must_use]
    pub fn uploads(&self) -> Vec<ResumeUpload> {
        self.lock().uploads.clone()
    }

    #[must_use]
    pub fn stored_profile(&self) -> Profile {
        self.lock().profile.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn available(&self) -> Result<MutexGuard<'_, State>, ApiError> {
        let state = self.lock();
        if state.unavailable {
            return Err(rejected(StatusCode::SERVICE_UNAVAILABLE, "Service unavailable"));
        }
        Ok(state)
    }
}

fn rejected(status: StatusCode, message: &str) -> ApiError {
    ApiError::HttpStatus {
        status,
        message: Some(message.to_string()),
    }
}

#[async_trait]
impl PlacementApi for InMemoryPlacementApi {
    async fn questions(&self, category: Category) -> Result<Vec<Question>, ApiError> {
        let state = self.available()?;
        Ok(state.questions.get(&category).cloned().unwrap_or_default())
    }

    async fn submit_test(&self, submission: &Submission) -> Result<(), ApiError> {
        let latency = self.available()?.submit_latency;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        self.available()?.submissions.push(submission.clone());
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let state = self.available()?;
        match state.accounts.get(&credentials.username) {
            Some(password) if *password == credentials.password => Ok(LoginResponse {
                token: format!("token-{}", credentials.username),
                username: Some(credentials.username.clone()),
            }),
            _ => Err(rejected(StatusCode::UNAUTHORIZED, "Invalid credentials")),
        }
    }

    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let mut state = self.available()?;
        if state.accounts.contains_key(&registration.username) {
            return Err(rejected(StatusCode::CONFLICT, "User exists or DB error"));
        }
        state
            .accounts
            .insert(registration.username.clone(), registration.password.clone());
        Ok(())
    }

    async fn profile(&self) -> Result<Profile, ApiError> {
        Ok(self.available()?.profile.clone())
    }

    async fn save_profile(&self, profile: &Profile) -> Result<(), ApiError> {
        self.available()?.profile = profile.clone();
        Ok(())
    }

    async fn results(&self) -> Result<ResultsReport, ApiError> {
        self.available()?
            .results
            .clone()
            .ok_or_else(|| rejected(StatusCode::NOT_FOUND, "No results yet"))
    }

    async fn upload_resume(&self, upload: ResumeUpload) -> Result<ResumeAnalysis, ApiError> {
        let mut state = self.available()?;
        state.uploads.push(upload);
        Ok(state.analysis.clone())
    }
}
