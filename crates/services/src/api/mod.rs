//! The placement API as seen by the client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use campusfit_core::model::{
    Category, Profile, Question, ResultsReport, ResumeAnalysis, ResumeUpload, Submission,
};

use crate::error::ApiError;

mod http;
mod memory;

pub use http::HttpPlacementApi;
pub use memory::InMemoryPlacementApi;

/// Body of `POST /auth/login`.
#[derive(Clone, Debug, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Body of `POST /auth/register`.
#[derive(Clone, Debug, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// Every remote call the client makes.
///
/// The HTTP implementation attaches the stored bearer token itself, so
/// callers never handle credentials.
#[async_trait]
pub trait PlacementApi: Send + Sync {
    /// `GET /questions/{CATEGORY}`.
    async fn questions(&self, category: Category) -> Result<Vec<Question>, ApiError>;

    /// `POST /tests/{category}` with `{ answers }`.
    async fn submit_test(&self, submission: &Submission) -> Result<(), ApiError>;

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;

    async fn register(&self, registration: &Registration) -> Result<(), ApiError>;

    async fn profile(&self) -> Result<Profile, ApiError>;

    async fn save_profile(&self, profile: &Profile) -> Result<(), ApiError>;

    async fn results(&self) -> Result<ResultsReport, ApiError>;

    /// Multipart `POST /resume/upload`.
    async fn upload_resume(&self, upload: ResumeUpload) -> Result<ResumeAnalysis, ApiError>;
}
