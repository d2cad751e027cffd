//! Route definitions for custom illustration uploads.

use axum::routing::get;
use axum::Router;

use crate::handlers::custom_illustration;
use crate::state::AppState;

/// Routes mounted at `/custom-illustrations`.
///
/// ```text
/// GET    /        list
/// POST   /        create (multipart upload)
/// DELETE /{id}    delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/custom-illustrations",
        Router::new()
            .route(
                "/",
                get(custom_illustration::list).post(custom_illustration::create),
            )
            .route(
                "/{id}",
                axum::routing::delete(custom_illustration::delete),
            ),
    )
}
