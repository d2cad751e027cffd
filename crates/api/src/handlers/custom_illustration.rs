//! Handlers for user-uploaded custom illustrations.
//!
//! Routes:
//! - `GET    /custom-illustrations`      — list the caller's illustrations
//! - `POST   /custom-illustrations`      — upload one (multipart)
//! - `DELETE /custom-illustrations/{id}` — delete row and stored object
//!
//! Uploads land in object storage under a fresh collision-resistant key;
//! the database row records the public URL plus the key so deletion can
//! remove the object again.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bytes::Bytes;

use storynest_core::error::CoreError;
use storynest_core::types::DbId;
use storynest_db::models::custom_illustration::CreateCustomIllustration;
use storynest_db::repositories::CustomIllustrationRepo;
use storynest_storage::{key, IMMUTABLE_CACHE_CONTROL};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Upload size limit (5 MiB), matching the client-side resize target.
const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// GET /api/v1/custom-illustrations
pub async fn list(State(state): State<AppState>, user: AuthUser) -> AppResult<impl IntoResponse> {
    let illustrations = CustomIllustrationRepo::list_by_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse {
        data: illustrations,
    }))
}

/// One parsed upload: metadata fields plus the image part.
struct UploadForm {
    title: Option<String>,
    description: Option<String>,
    file: Option<(Bytes, String, String)>, // (bytes, extension, content type)
}

/// POST /api/v1/custom-illustrations
///
/// Multipart form: `title` (required), `description` (optional), `image`
/// (required file part).
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let store = state
        .media_store
        .as_ref()
        .ok_or(AppError::Config("Object storage not configured"))?;

    let form = read_upload_form(multipart).await?;

    let title = form
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("title is required".into()))?;
    let (bytes, extension, content_type) = form
        .file
        .ok_or_else(|| AppError::BadRequest("image file is required".into()))?;

    if bytes.is_empty() {
        return Err(AppError::BadRequest("image file is empty".into()));
    }

    let storage_key = key::custom_illustration_key(&extension);
    let image_url = store
        .put(&storage_key, bytes, &content_type, IMMUTABLE_CACHE_CONTROL)
        .await
        .map_err(|e| AppError::InternalError(format!("Upload failed: {e}")))?;

    let illustration = CustomIllustrationRepo::create(
        &state.pool,
        &CreateCustomIllustration {
            user_id: user.user_id,
            title,
            description: form.description.filter(|d| !d.trim().is_empty()),
            image_url,
            storage_key,
        },
    )
    .await?;

    tracing::info!(
        illustration_id = illustration.id,
        user_id = user.user_id,
        "Custom illustration uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: illustration }),
    ))
}

/// DELETE /api/v1/custom-illustrations/{id}
///
/// Removes the stored object best-effort before deleting the row; a
/// failed object delete is logged but does not keep the row alive.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let illustration = CustomIllustrationRepo::find_for_user(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CustomIllustration",
            id,
        }))?;

    if let Some(store) = &state.media_store {
        if let Err(err) = store.delete(&illustration.storage_key).await {
            tracing::warn!(
                key = %illustration.storage_key,
                error = %err,
                "Failed to delete stored object"
            );
        }
    }

    CustomIllustrationRepo::delete(&state.pool, id, user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Drain the multipart stream into an [`UploadForm`].
async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm {
        title: None,
        description: None,
        file: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        match field.name().unwrap_or_default() {
            "title" => {
                form.title = Some(read_text(field).await?);
            }
            "description" => {
                form.description = Some(read_text(field).await?);
            }
            "image" => {
                let extension = field
                    .file_name()
                    .and_then(|name| name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase()))
                    .unwrap_or_else(|| "png".to_string());
                let content_type = field
                    .content_type()
                    .map(String::from)
                    .unwrap_or_else(|| "image/png".to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid image upload: {e}")))?;
                if bytes.len() > MAX_UPLOAD_BYTES {
                    return Err(AppError::BadRequest(format!(
                        "image exceeds the {MAX_UPLOAD_BYTES} byte limit"
                    )));
                }
                form.file = Some((bytes, extension, content_type));
            }
            // Unknown fields are ignored rather than rejected.
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart field: {e}")))
}
