use thiserror::Error;
use url::Url;

/// API root used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000/api";

/// Client-local state that outlives a single test: the API root, the bearer
/// credential and whether the test instructions were already dismissed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientSettings {
    api_base_url: Option<String>,
    auth_token: Option<String>,
    seen_test_instructions: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ClientSettingsDraft {
    pub api_base_url: Option<String>,
    pub auth_token: Option<String>,
    pub seen_test_instructions: bool,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("invalid base URL")]
    InvalidBaseUrl,
}

impl ClientSettingsDraft {
    /// Validate and normalize the draft into persisted settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the base URL is present but invalid.
    pub fn validate(self) -> Result<ClientSettings, SettingsError> {
        let api_base_url = normalize_optional(self.api_base_url)
            .map(|url| url.trim_end_matches('/').to_string());
        let auth_token = normalize_optional(self.auth_token);

        if let Some(url) = api_base_url.as_ref() {
            if Url::parse(url).is_err() {
                return Err(SettingsError::InvalidBaseUrl);
            }
        }

        Ok(ClientSettings {
            api_base_url,
            auth_token,
            seen_test_instructions: self.seen_test_instructions,
        })
    }
}

impl ClientSettings {
    /// Rehydrate settings from storage.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the stored base URL no longer parses.
    pub fn from_persisted(
        api_base_url: Option<String>,
        auth_token: Option<String>,
        seen_test_instructions: bool,
    ) -> Result<Self, SettingsError> {
        ClientSettingsDraft {
            api_base_url,
            auth_token,
            seen_test_instructions,
        }
        .validate()
    }

    #[must_use]
    pub fn api_base_url(&self) -> Option<&str> {
        self.api_base_url.as_deref()
    }

    /// Stored base URL, or the built-in default.
    #[must_use]
    pub fn effective_api_base_url(&self) -> &str {
        self.api_base_url().unwrap_or(DEFAULT_API_BASE_URL)
    }

    #[must_use]
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    #[must_use]
    pub fn seen_test_instructions(&self) -> bool {
        self.seen_test_instructions
    }

    #[must_use]
    pub fn to_draft(&self) -> ClientSettingsDraft {
        ClientSettingsDraft {
            api_base_url: self.api_base_url.clone(),
            auth_token: self.auth_token.clone(),
            seen_test_instructions: self.seen_test_instructions,
        }
    }

    #[must_use]
    pub fn with_auth_token(&self, token: Option<String>) -> Self {
        Self {
            auth_token: normalize_optional(token),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_seen_test_instructions(&self) -> Self {
        Self {
            seen_test_instructions: true,
            ..self.clone()
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
