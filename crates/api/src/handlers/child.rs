//! Handlers for the `/children` resource.
//!
//! Routes:
//! - `GET    /children`        — list the caller's child profiles
//! - `POST   /children`        — create a profile
//! - `GET    /children/{id}`   — fetch one profile
//! - `PUT    /children/{id}`   — update a profile
//! - `DELETE /children/{id}`   — delete a profile (stories cascade)

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use storynest_core::error::CoreError;
use storynest_core::reading_level;
use storynest_core::types::DbId;
use storynest_db::models::child::{CreateChild, UpdateChild};
use storynest_db::repositories::ChildRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/children
pub async fn list(State(state): State<AppState>, user: AuthUser) -> AppResult<impl IntoResponse> {
    let children = ChildRepo::list_by_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: children }))
}

/// POST /api/v1/children
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateChild>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_reading_level(&input.reading_level)?;

    let child = ChildRepo::create(&state.pool, user.user_id, &input).await?;
    tracing::info!(child_id = child.id, user_id = user.user_id, "Child profile created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: child })))
}

/// GET /api/v1/children/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let child = ChildRepo::find_for_user(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Child",
            id,
        }))?;

    Ok(Json(DataResponse { data: child }))
}

/// PUT /api/v1/children/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateChild>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(level) = &input.reading_level {
        validate_reading_level(level)?;
    }

    let child = ChildRepo::update(&state.pool, id, user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Child",
            id,
        }))?;

    Ok(Json(DataResponse { data: child }))
}

/// DELETE /api/v1/children/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ChildRepo::delete(&state.pool, id, user.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Child",
            id,
        }));
    }

    tracing::info!(child_id = id, user_id = user.user_id, "Child profile deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Profiles may only be saved with a reading level the policy table knows.
/// (Prompt building falls back for legacy values; new writes do not get to
/// introduce them.)
fn validate_reading_level(level: &str) -> Result<(), AppError> {
    if reading_level::is_known_level(level) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "Unknown reading level '{level}'. Must be one of: {}",
            reading_level::READING_LEVELS
                .iter()
                .map(|p| p.level)
                .collect::<Vec<_>>()
                .join(", ")
        ))))
    }
}
