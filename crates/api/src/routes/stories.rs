//! Route definitions for story generation and story-scoped operations.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{generate, story};
use crate::state::AppState;

/// Routes mounted at `/stories`.
///
/// ```text
/// POST   /generate        run the generation pipeline (POST only)
/// GET    /{id}            get_by_id
/// DELETE /{id}            delete
/// PUT    /{id}/favorite   toggle_favorite
/// ```
pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/stories",
        Router::new()
            .route("/generate", post(generate::generate_story))
            .route("/{id}", get(story::get_by_id).delete(story::delete))
            .route("/{id}/favorite", put(story::toggle_favorite)),
    )
}
