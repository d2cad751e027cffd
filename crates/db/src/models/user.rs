//! User account model.

use serde::Serialize;
use sqlx::FromRow;
use storynest_core::types::{DbId, Timestamp};

/// A user row from the `users` table.
///
/// The password hash stays server-side; use [`User::into_public`] for
/// anything that leaves the API.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// User fields safe to return to clients.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: DbId,
    pub email: String,
    pub display_name: Option<String>,
}

impl User {
    pub fn into_public(self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email,
            display_name: self.display_name,
        }
    }
}

/// Internal DTO for inserting a user (hash already computed).
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
}
