use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use tracing::debug;

use campusfit_core::model::{
    Category, Profile, Question, ResultsReport, ResumeAnalysis, ResumeUpload, Submission,
};
use storage::repository::SettingsRepository;

use super::{Credentials, LoginResponse, PlacementApi, Registration};
use crate::error::ApiError;

/// `PlacementApi` over HTTP with `reqwest`.
#[derive(Clone)]
pub struct HttpPlacementApi {
    client: Client,
    base_url: String,
    settings: Arc<dyn SettingsRepository>,
}

impl HttpPlacementApi {
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` if `base_url` does not parse.
    pub fn new(base_url: &str, settings: Arc<dyn SettingsRepository>) -> Result<Self, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        Url::parse(trimmed).map_err(|_| ApiError::InvalidBaseUrl(base_url.to_string()))?;
        Ok(Self {
            client: Client::new(),
            base_url: trimmed.to_string(),
            settings,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attach the stored bearer token, if there is one.
    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let token = self
            .settings
            .get_settings()
            .await?
            .and_then(|settings| settings.auth_token().map(str::to_owned));
        Ok(match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = self.authorize(request).await?.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error);
        debug!(%status, ?message, "request rejected");
        Err(ApiError::HttpStatus { status, message })
    }
}

#[async_trait]
impl PlacementApi for HttpPlacementApi {
    async fn questions(&self, category: Category) -> Result<Vec<Question>, ApiError> {
        let url = self.endpoint(&format!("questions/{}", category.bank_key()));
        let body: QuestionsResponse = self.send(self.client.get(url)).await?.json().await?;
        Ok(body.questions)
    }

    async fn submit_test(&self, submission: &Submission) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("tests/{}", submission.category.slug()));
        self.send(self.client.post(url).json(&submission.body()))
            .await?;
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let url = self.endpoint("auth/login");
        Ok(self
            .send(self.client.post(url).json(credentials))
            .await?
            .json()
            .await?)
    }

    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let url = self.endpoint("auth/register");
        self.send(self.client.post(url).json(registration)).await?;
        Ok(())
    }

    async fn profile(&self) -> Result<Profile, ApiError> {
        let url = self.endpoint("profile");
        Ok(self.send(self.client.get(url)).await?.json().await?)
    }

    async fn save_profile(&self, profile: &Profile) -> Result<(), ApiError> {
        let url = self.endpoint("profile");
        self.send(self.client.post(url).json(profile)).await?;
        Ok(())
    }

    async fn results(&self) -> Result<ResultsReport, ApiError> {
        let url = self.endpoint("results");
        Ok(self.send(self.client.get(url)).await?.json().await?)
    }

    async fn upload_resume(&self, upload: ResumeUpload) -> Result<ResumeAnalysis, ApiError> {
        let url = self.endpoint("resume/upload");
        let (file_name, bytes, job_description) = upload.into_parts();
        let mut form = Form::new().part("resume", Part::bytes(bytes).file_name(file_name));
        if let Some(job_description) = job_description {
            form = form.text("job_description", job_description);
        }
        Ok(self
            .send(self.client.post(url).multipart(form))
            .await?
            .json()
            .await?)
    }
}

#[derive(Debug, Deserialize)]
struct QuestionsResponse {
    #[serde(default)]
    questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;

    fn settings() -> Arc<dyn SettingsRepository> {
        Arc::new(InMemoryRepository::new())
    }

    #[test]
    fn joins_endpoints_without_double_slashes() {
        let api = HttpPlacementApi::new("http://127.0.0.1:5000/api/", settings()).unwrap();
        assert_eq!(api.base_url(), "http://127.0.0.1:5000/api");
        assert_eq!(
            api.endpoint("/questions/APTITUDE"),
            "http://127.0.0.1:5000/api/questions/APTITUDE"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = HttpPlacementApi::new("not a url", settings()).err();
        assert!(matches!(err, Some(ApiError::InvalidBaseUrl(_))));
    }

    #[test]
    fn question_payload_with_bad_letter_fails_to_decode() {
        let json = r#"{"questions":[
            {"id":"Q1","category":"APTITUDE","question":"2+2?","options":["3","4"],"correct_letter":"b"},
            {"id":"Q2","category":"APTITUDE","question":"1+1?","options":["2","3"],"correct_letter":"C"}
        ]}"#;
        assert!(serde_json::from_str::<QuestionsResponse>(json).is_err());

        let ok = r#"{"questions":[
            {"id":"Q1","category":"APTITUDE","question":"2+2?","options":["3","4"],"correct_letter":"b"}
        ]}"#;
        let body: QuestionsResponse = serde_json::from_str(ok).unwrap();
        assert_eq!(body.questions[0].correct_option(), "4");
    }

    #[test]
    fn error_body_is_optional() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"Invalid credentials"}"#).unwrap();
        assert_eq!(body.error.as_deref(), Some("Invalid credentials"));
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.error.is_none());
    }
}
