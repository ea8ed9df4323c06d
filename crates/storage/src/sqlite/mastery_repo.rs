use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use tracing::debug;

use crate::repository::{
    MASTERED_IDS_KEY, MasteryRepository, StorageError, decode_mastered, encode_mastered,
};
use flashmaster_core::model::MasterySet;

use super::SqliteRepository;

#[async_trait]
impl MasteryRepository for SqliteRepository {
    async fn load_mastered(&self) -> Result<MasterySet, StorageError> {
        let row = sqlx::query("SELECT value FROM app_state WHERE key = ?1")
            .bind(MASTERED_IDS_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(MasterySet::new());
        };

        let raw: String = row
            .try_get("value")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        Ok(decode_mastered(&raw))
    }

    async fn save_mastered(&self, mastered: &MasterySet) -> Result<(), StorageError> {
        let value = encode_mastered(mastered)?;

        sqlx::query(
            r"
            INSERT INTO app_state (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(MASTERED_IDS_KEY)
        .bind(&value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        debug!(count = mastered.len(), "persisted mastery set");
        Ok(())
    }

    async fn clear_mastered(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM app_state WHERE key = ?1")
            .bind(MASTERED_IDS_KEY)
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        debug!("cleared persisted mastery set");
        Ok(())
    }
}
