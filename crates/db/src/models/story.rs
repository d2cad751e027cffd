//! Persisted story model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storynest_core::types::{DbId, Timestamp};
use validator::Validate;

/// A story row from the `stories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Story {
    pub id: DbId,
    pub child_id: DbId,
    pub title: String,
    pub content: String,
    pub custom_prompt: Option<String>,
    /// Illustration entries as returned by the generation endpoint
    /// (description/position/imageUrl), stored verbatim.
    pub illustrations: Option<serde_json::Value>,
    pub source_illustration_url: Option<String>,
    pub is_favorited: bool,
    pub created_at: Timestamp,
}

/// DTO for persisting a generated story under a child profile.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStory {
    #[validate(length(min = 1, max = 300, message = "title must be 1-300 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: String,
    pub custom_prompt: Option<String>,
    pub illustrations: Option<serde_json::Value>,
    pub source_illustration_url: Option<String>,
}
