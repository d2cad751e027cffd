//! Handler for the story-generation endpoint.
//!
//! Route:
//! - `POST /stories/generate` — generate a personalized story
//!
//! The request/response shapes, error bodies, and status codes here are a
//! wire contract shared with deployed clients; changes must stay
//! backward-compatible. The endpoint persists nothing -- clients save the
//! result through the stories CRUD.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use storynest_core::characteristics::PhysicalCharacteristics;
use storynest_core::story::{SourceIllustration, StoryRequest};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /stories/generate`.
///
/// Every field is optional at the serde layer so that absent, `null`, and
/// empty values all funnel into the same "Missing required fields" answer
/// instead of a deserialization error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateStoryRequest {
    pub child_name: Option<String>,
    pub child_age: Option<i32>,
    pub reading_level: Option<String>,
    pub favorite_things: Option<Vec<String>>,
    pub parent_summary: Option<String>,
    pub custom_prompt: Option<String>,
    pub source_illustration: Option<SourceIllustration>,
    pub physical_characteristics: Option<PhysicalCharacteristics>,
}

impl GenerateStoryRequest {
    /// Check required fields and convert into the pipeline request.
    ///
    /// Required: non-empty name, non-zero age, non-empty reading level,
    /// non-empty interests list. One flat error message covers them all.
    fn into_story_request(self) -> Result<StoryRequest, AppError> {
        let child_name = self.child_name.filter(|v| !v.is_empty());
        let child_age = self.child_age.filter(|v| *v != 0);
        let reading_level = self.reading_level.filter(|v| !v.is_empty());
        let favorite_things = self.favorite_things.filter(|v| !v.is_empty());

        match (child_name, child_age, reading_level, favorite_things) {
            (Some(child_name), Some(child_age), Some(reading_level), Some(favorite_things)) => {
                Ok(StoryRequest {
                    child_name,
                    child_age,
                    reading_level,
                    favorite_things,
                    parent_summary: self.parent_summary,
                    custom_prompt: self.custom_prompt,
                    source_illustration: self.source_illustration,
                    physical_characteristics: self.physical_characteristics,
                })
            }
            _ => Err(AppError::BadRequest("Missing required fields".to_string())),
        }
    }
}

/// POST /api/v1/stories/generate
///
/// Runs the generation pipeline and returns the story payload. Responses
/// carry `Cache-Control: no-store`: every call produces a fresh,
/// non-idempotent result.
pub async fn generate_story(
    State(state): State<AppState>,
    Json(input): Json<GenerateStoryRequest>,
) -> AppResult<impl IntoResponse> {
    // Validate before touching any upstream service.
    let request = input.into_story_request()?;

    let pipeline = state
        .story
        .as_ref()
        .ok_or(AppError::Config("Anthropic API key not configured"))?;

    let story = pipeline.generate(&request).await?;

    tracing::info!(
        title = %story.title,
        illustrations = story.illustrations.len(),
        warning = ?story.warning,
        "Story generated"
    );

    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        Json(story),
    ))
}
