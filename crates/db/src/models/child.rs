//! Child profile model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storynest_core::types::{DbId, Timestamp};
use validator::Validate;

/// A child row from the `children` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Child {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub age: i32,
    pub reading_level: String,
    pub favorite_things: Vec<String>,
    pub parent_summary: Option<String>,
    /// Appearance fields; NULL and "diverse" both mean unconstrained.
    pub skin_tone: Option<String>,
    pub hair_color: Option<String>,
    pub eye_color: Option<String>,
    pub gender: Option<String>,
    pub pronouns: Option<String>,
    pub profile_image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new child profile.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateChild {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(range(min = 1, max = 17, message = "age must be between 1 and 17"))]
    pub age: i32,
    /// Checked against the reading-level table in the handler.
    pub reading_level: String,
    #[validate(length(min = 1, message = "at least one favorite thing is required"))]
    pub favorite_things: Vec<String>,
    pub parent_summary: Option<String>,
    pub skin_tone: Option<String>,
    pub hair_color: Option<String>,
    pub eye_color: Option<String>,
    pub gender: Option<String>,
    pub pronouns: Option<String>,
    pub profile_image_url: Option<String>,
}

/// DTO for updating an existing child profile. Only non-`None` fields are
/// applied; send the `"diverse"` sentinel to release an appearance
/// constraint.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateChild {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(range(min = 1, max = 17, message = "age must be between 1 and 17"))]
    pub age: Option<i32>,
    /// Checked against the reading-level table in the handler.
    pub reading_level: Option<String>,
    #[validate(length(min = 1, message = "at least one favorite thing is required"))]
    pub favorite_things: Option<Vec<String>>,
    pub parent_summary: Option<String>,
    pub skin_tone: Option<String>,
    pub hair_color: Option<String>,
    pub eye_color: Option<String>,
    pub gender: Option<String>,
    pub pronouns: Option<String>,
    pub profile_image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create() -> CreateChild {
        CreateChild {
            name: "Mira".into(),
            age: 6,
            reading_level: "Kindergarten".into(),
            favorite_things: vec!["cats".into()],
            parent_summary: None,
            skin_tone: None,
            hair_color: None,
            eye_color: None,
            gender: None,
            pronouns: None,
            profile_image_url: None,
        }
    }

    #[test]
    fn valid_create_passes() {
        assert!(create().validate().is_ok());
    }

    #[test]
    fn empty_favorite_things_fails_validation() {
        let mut input = create();
        input.favorite_things.clear();
        assert!(input.validate().is_err());
    }

    #[test]
    fn out_of_range_age_fails_validation() {
        let mut input = create();
        input.age = 0;
        assert!(input.validate().is_err());
    }
}
