use dioxus::prelude::*;

use services::{
    ApiError, AssessmentServiceError, AuthError, ProfileServiceError, ResumeServiceError,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    NoQuestions,
    Unauthorized,
    /// A message meant for the user, usually the server's `error` field.
    Message(String),
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.",
            ViewError::NoQuestions => "No questions are available for this test right now.",
            ViewError::Unauthorized => "Your session has expired. Please sign in again.",
            ViewError::Message(message) => message,
        }
    }
}

impl From<&ApiError> for ViewError {
    fn from(err: &ApiError) -> Self {
        if err.is_unauthorized() {
            return ViewError::Unauthorized;
        }
        err.server_message()
            .map_or(ViewError::Unknown, |message| {
                ViewError::Message(message.to_string())
            })
    }
}

impl From<ApiError> for ViewError {
    fn from(err: ApiError) -> Self {
        ViewError::from(&err)
    }
}

impl From<AuthError> for ViewError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Api(api) => ViewError::from(&api),
            AuthError::MissingField(_) | AuthError::InvalidEmail => {
                ViewError::Message(capitalize(&err.to_string()))
            }
            _ => ViewError::Unknown,
        }
    }
}

impl From<ProfileServiceError> for ViewError {
    fn from(err: ProfileServiceError) -> Self {
        match err {
            ProfileServiceError::Invalid(invalid) => ViewError::Message(invalid.to_string()),
            ProfileServiceError::Api(api) => ViewError::from(&api),
            _ => ViewError::Unknown,
        }
    }
}

impl From<ResumeServiceError> for ViewError {
    fn from(err: ResumeServiceError) -> Self {
        match err {
            ResumeServiceError::Invalid(invalid) => ViewError::Message(invalid.to_string()),
            ResumeServiceError::Api(api) => ViewError::from(&api),
            _ => ViewError::Unknown,
        }
    }
}

impl From<AssessmentServiceError> for ViewError {
    fn from(err: AssessmentServiceError) -> Self {
        match err {
            AssessmentServiceError::Api(api) => ViewError::from(&api),
            _ => ViewError::Unknown,
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
