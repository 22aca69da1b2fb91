use std::sync::Arc;

use tracing::info;

use crate::api::{Credentials, PlacementApi, Registration};
use crate::error::AuthError;
use crate::settings_service::SettingsService;

/// Sign-in, sign-up and sign-out. The token lives in the settings store.
#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn PlacementApi>,
    settings: Arc<SettingsService>,
}

impl AuthService {
    #[must_use]
    pub fn new(api: Arc<dyn PlacementApi>, settings: Arc<SettingsService>) -> Self {
        Self { api, settings }
    }

    /// Exchange credentials for a token and store it.
    ///
    /// Returns the username the server reported.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` for blank input, `AuthError::Api`
    /// when the server rejects the credentials, and `AuthError::Settings` if
    /// the token cannot be stored.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let credentials = Credentials {
            username: required("username", username)?,
            password: required("password", password)?,
        };
        let response = self.api.login(&credentials).await?;
        self.settings
            .store_auth_token(Some(response.token))
            .await?;
        let username = response.username.unwrap_or(credentials.username);
        info!(%username, "signed in");
        Ok(username)
    }

    /// # Errors
    ///
    /// Returns `AuthError` for blank fields, an implausible email, or a
    /// server rejection.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        let registration = Registration {
            username: required("username", username)?,
            email: required("email", email)?,
            password: required("password", password)?,
        };
        if !plausible_email(&registration.email) {
            return Err(AuthError::InvalidEmail);
        }
        self.api.register(&registration).await?;
        info!(username = %registration.username, "account created");
        Ok(())
    }

    /// Forget the stored token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Settings` if the store cannot be written.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.settings.store_auth_token(None).await?;
        info!("signed out");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `AuthError::Settings` if the store cannot be read.
    pub async fn is_signed_in(&self) -> Result<bool, AuthError> {
        Ok(self.settings.load().await?.auth_token().is_some())
    }
}

fn required(field: &'static str, value: &str) -> Result<String, AuthError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AuthError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn plausible_email(email: &str) -> bool {
    email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'))
}
