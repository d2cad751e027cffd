//! Repository for the `custom_illustrations` table.

use sqlx::PgPool;
use storynest_core::types::DbId;

use crate::models::custom_illustration::{CreateCustomIllustration, CustomIllustration};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, description, image_url, storage_key, created_at";

/// CRUD operations for user-uploaded illustrations.
pub struct CustomIllustrationRepo;

impl CustomIllustrationRepo {
    /// Insert a record for an already-uploaded illustration.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCustomIllustration,
    ) -> Result<CustomIllustration, sqlx::Error> {
        let query = format!(
            "INSERT INTO custom_illustrations (user_id, title, description, image_url, storage_key)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CustomIllustration>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.storage_key)
            .fetch_one(pool)
            .await
    }

    /// Find an illustration owned by `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<CustomIllustration>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM custom_illustrations WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, CustomIllustration>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all illustrations for a user, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<CustomIllustration>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM custom_illustrations
             WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, CustomIllustration>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Delete an illustration row. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM custom_illustrations WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
