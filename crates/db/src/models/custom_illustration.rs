//! User-uploaded custom illustration model.

use serde::Serialize;
use sqlx::FromRow;
use storynest_core::types::{DbId, Timestamp};

/// A custom illustration row. The image itself lives in object storage;
/// `storage_key` is kept so deletion can remove the stored object.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CustomIllustration {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    #[serde(skip_serializing)]
    pub storage_key: String,
    pub created_at: Timestamp,
}

/// Internal DTO for inserting a custom illustration after upload.
#[derive(Debug, Clone)]
pub struct CreateCustomIllustration {
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub storage_key: String,
}
