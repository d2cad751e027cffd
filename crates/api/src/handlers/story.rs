//! Handlers for persisted stories.
//!
//! Routes:
//! - `GET    /children/{child_id}/stories` — list a child's stories
//! - `POST   /children/{child_id}/stories` — persist a generated story
//! - `GET    /stories/{id}`                — fetch one story
//! - `DELETE /stories/{id}`                — delete a story
//! - `PUT    /stories/{id}/favorite`       — toggle the favorite flag

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use storynest_core::error::CoreError;
use storynest_core::types::DbId;
use storynest_db::models::story::CreateStory;
use storynest_db::repositories::{ChildRepo, StoryRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/children/{child_id}/stories
pub async fn list_by_child(
    State(state): State<AppState>,
    user: AuthUser,
    Path(child_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    // Distinguish "no stories yet" from "not your child".
    ensure_child_owned(&state, child_id, user.user_id).await?;

    let stories = StoryRepo::list_by_child(&state.pool, child_id, user.user_id).await?;
    Ok(Json(DataResponse { data: stories }))
}

/// POST /api/v1/children/{child_id}/stories
///
/// Persist a story the client received from the generation endpoint. The
/// illustrations array is stored verbatim as JSON.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(child_id): Path<DbId>,
    Json(input): Json<CreateStory>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    ensure_child_owned(&state, child_id, user.user_id).await?;

    let story = StoryRepo::create(&state.pool, child_id, &input).await?;
    tracing::info!(story_id = story.id, child_id, "Story saved");

    Ok((StatusCode::CREATED, Json(DataResponse { data: story })))
}

/// GET /api/v1/stories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let story = StoryRepo::find_for_user(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Story",
            id,
        }))?;

    Ok(Json(DataResponse { data: story }))
}

/// PUT /api/v1/stories/{id}/favorite
pub async fn toggle_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let story = StoryRepo::toggle_favorite(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Story",
            id,
        }))?;

    Ok(Json(DataResponse { data: story }))
}

/// DELETE /api/v1/stories/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = StoryRepo::delete(&state.pool, id, user.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Story",
            id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Verify that `child_id` belongs to `user_id`, answering 404 otherwise.
async fn ensure_child_owned(state: &AppState, child_id: DbId, user_id: DbId) -> AppResult<()> {
    ChildRepo::find_for_user(&state.pool, child_id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Child",
            id: child_id,
        }))?;
    Ok(())
}
