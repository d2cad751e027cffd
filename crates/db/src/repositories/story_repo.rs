//! Repository for the `stories` table.
//!
//! Ownership flows through the parent child row: every query joins on
//! `children` and filters by its `user_id`.

use sqlx::PgPool;
use storynest_core::types::DbId;

use crate::models::story::{CreateStory, Story};

/// Column list (story columns only, qualified for the ownership join).
const COLUMNS: &str = "s.id, s.child_id, s.title, s.content, s.custom_prompt, \
     s.illustrations, s.source_illustration_url, s.is_favorited, s.created_at";

/// CRUD operations for persisted stories.
pub struct StoryRepo;

impl StoryRepo {
    /// Insert a story under a child profile, returning the created row.
    ///
    /// The caller must have verified child ownership first (see
    /// [`crate::repositories::ChildRepo::find_for_user`]).
    pub async fn create(
        pool: &PgPool,
        child_id: DbId,
        input: &CreateStory,
    ) -> Result<Story, sqlx::Error> {
        sqlx::query_as::<_, Story>(
            "INSERT INTO stories (child_id, title, content, custom_prompt,
                                  illustrations, source_illustration_url)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, child_id, title, content, custom_prompt,
                       illustrations, source_illustration_url, is_favorited, created_at",
        )
        .bind(child_id)
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.custom_prompt)
        .bind(&input.illustrations)
        .bind(&input.source_illustration_url)
        .fetch_one(pool)
        .await
    }

    /// Find a story owned (through its child) by `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Story>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stories s
             JOIN children c ON c.id = s.child_id
             WHERE s.id = $1 AND c.user_id = $2"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List stories for a child, newest first.
    pub async fn list_by_child(
        pool: &PgPool,
        child_id: DbId,
        user_id: DbId,
    ) -> Result<Vec<Story>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stories s
             JOIN children c ON c.id = s.child_id
             WHERE s.child_id = $1 AND c.user_id = $2
             ORDER BY s.created_at DESC"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(child_id)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Flip the favorite flag, returning the updated story.
    pub async fn toggle_favorite(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Story>, sqlx::Error> {
        sqlx::query_as::<_, Story>(
            "UPDATE stories s SET is_favorited = NOT is_favorited
             FROM children c
             WHERE s.id = $1 AND c.id = s.child_id AND c.user_id = $2
             RETURNING s.id, s.child_id, s.title, s.content, s.custom_prompt,
                       s.illustrations, s.source_illustration_url, s.is_favorited, s.created_at",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Delete a story. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM stories s
             USING children c
             WHERE s.id = $1 AND c.id = s.child_id AND c.user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
