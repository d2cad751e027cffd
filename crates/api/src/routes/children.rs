//! Route definitions for child profiles and their nested stories.

use axum::routing::get;
use axum::Router;

use crate::handlers::{child, story};
use crate::state::AppState;

/// Routes mounted at `/children`.
///
/// ```text
/// GET    /                          list
/// POST   /                          create
/// GET    /{id}                      get_by_id
/// PUT    /{id}                      update
/// DELETE /{id}                      delete
///
/// GET    /{id}/stories              list_by_child
/// POST   /{id}/stories              create (persist a generated story)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/children",
        Router::new()
            .route("/", get(child::list).post(child::create))
            .route(
                "/{id}",
                get(child::get_by_id)
                    .put(child::update)
                    .delete(child::delete),
            )
            .route(
                "/{id}/stories",
                get(story::list_by_child).post(story::create),
            ),
    )
}
