//! Shared error types for the services crate.

use thiserror::Error;

use campusfit_core::assessment::AssessmentError;
use campusfit_core::model::{ProfileError, ResumeError, SettingsError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the placement API client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("request failed with status {status}")]
    HttpStatus {
        status: reqwest::StatusCode,
        /// The `error` field of the response body, when the server sent one.
        message: Option<String>,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("could not read stored credentials: {0}")]
    Credentials(#[from] StorageError),
}

impl ApiError {
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::HttpStatus { status, .. } if *status == reqwest::StatusCode::UNAUTHORIZED
        )
    }

    /// Message supplied by the server, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Errors emitted by `SettingsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsServiceError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("email address is not valid")]
    InvalidEmail,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Settings(#[from] SettingsServiceError),
}

/// Errors emitted by `ProfileService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileServiceError {
    #[error(transparent)]
    Invalid(#[from] ProfileError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `ResumeService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResumeServiceError {
    #[error(transparent)]
    Invalid(#[from] ResumeError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `AssessmentService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Session(#[from] AssessmentError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Settings(#[from] SettingsServiceError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
