//! Repository for the `children` table.

use sqlx::PgPool;
use storynest_core::types::DbId;

use crate::models::child::{Child, CreateChild, UpdateChild};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, age, reading_level, favorite_things, parent_summary, \
     skin_tone, hair_color, eye_color, gender, pronouns, profile_image_url, \
     created_at, updated_at";

/// CRUD operations for child profiles. All lookups are scoped to the
/// owning user so one account can never see another's children.
pub struct ChildRepo;

impl ChildRepo {
    /// Insert a new child profile for `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateChild,
    ) -> Result<Child, sqlx::Error> {
        let query = format!(
            "INSERT INTO children (user_id, name, age, reading_level, favorite_things,
                                   parent_summary, skin_tone, hair_color, eye_color,
                                   gender, pronouns, profile_image_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Child>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(input.age)
            .bind(&input.reading_level)
            .bind(&input.favorite_things)
            .bind(&input.parent_summary)
            .bind(&input.skin_tone)
            .bind(&input.hair_color)
            .bind(&input.eye_color)
            .bind(&input.gender)
            .bind(&input.pronouns)
            .bind(&input.profile_image_url)
            .fetch_one(pool)
            .await
    }

    /// Find a child owned by `user_id`. Children of other users are
    /// indistinguishable from nonexistent ones.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Child>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM children WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Child>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all children for a user, oldest profile first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Child>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM children WHERE user_id = $1 ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Child>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a child profile. Only non-`None` fields in `input` are
    /// applied. Returns `None` if the child does not exist for this user.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateChild,
    ) -> Result<Option<Child>, sqlx::Error> {
        let query = format!(
            "UPDATE children SET
                name = COALESCE($3, name),
                age = COALESCE($4, age),
                reading_level = COALESCE($5, reading_level),
                favorite_things = COALESCE($6, favorite_things),
                parent_summary = COALESCE($7, parent_summary),
                skin_tone = COALESCE($8, skin_tone),
                hair_color = COALESCE($9, hair_color),
                eye_color = COALESCE($10, eye_color),
                gender = COALESCE($11, gender),
                pronouns = COALESCE($12, pronouns),
                profile_image_url = COALESCE($13, profile_image_url),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Child>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(input.age)
            .bind(&input.reading_level)
            .bind(&input.favorite_things)
            .bind(&input.parent_summary)
            .bind(&input.skin_tone)
            .bind(&input.hair_color)
            .bind(&input.eye_color)
            .bind(&input.gender)
            .bind(&input.pronouns)
            .bind(&input.profile_image_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a child profile (stories cascade). Returns `true` if a row
    /// was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM children WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
