use async_trait::async_trait;
use sqlx::Row;

use crate::repository::{SettingsRepository, StorageError};
use campusfit_core::model::ClientSettings;

use super::SqliteRepository;

#[async_trait]
impl SettingsRepository for SqliteRepository {
    async fn get_settings(&self) -> Result<Option<ClientSettings>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT
                api_base_url,
                auth_token,
                seen_test_instructions
            FROM client_settings
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let api_base_url: Option<String> = row
            .try_get("api_base_url")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let auth_token: Option<String> = row
            .try_get("auth_token")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let seen_test_instructions: bool = row
            .try_get("seen_test_instructions")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        ClientSettings::from_persisted(api_base_url, auth_token, seen_test_instructions)
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    async fn save_settings(&self, settings: &ClientSettings) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO client_settings (
                id,
                api_base_url,
                auth_token,
                seen_test_instructions
            )
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                api_base_url = excluded.api_base_url,
                auth_token = excluded.auth_token,
                seen_test_instructions = excluded.seen_test_instructions
            ",
        )
        .bind(1_i64)
        .bind(settings.api_base_url())
        .bind(settings.auth_token())
        .bind(settings.seen_test_instructions())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
