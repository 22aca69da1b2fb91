#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod assessments;
pub mod auth_service;
pub mod dashboard_service;
pub mod error;
pub mod profile_service;
pub mod resume_service;
pub mod settings_service;

pub use api::{Credentials, HttpPlacementApi, InMemoryPlacementApi, PlacementApi, Registration};
pub use app_services::AppServices;
pub use assessments::{AssessmentService, QuestionLoader};
pub use auth_service::AuthService;
pub use dashboard_service::{DashboardOverview, DashboardService};
pub use error::{
    ApiError, AppServicesError, AssessmentServiceError, AuthError, ProfileServiceError,
    ResumeServiceError, SettingsServiceError,
};
pub use profile_service::ProfileService;
pub use resume_service::ResumeService;
pub use settings_service::SettingsService;
