pub mod auth;
pub mod children;
pub mod custom_illustrations;
pub mod health;
pub mod stories;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/me                             current user (requires auth)
///
/// /stories/generate                    generate a story (POST, public)
/// /stories/{id}                        get, delete (requires auth)
/// /stories/{id}/favorite               toggle favorite (PUT)
///
/// /children                            list, create
/// /children/{id}                       get, update, delete
/// /children/{child_id}/stories         list, create
///
/// /custom-illustrations                list, upload (multipart)
/// /custom-illustrations/{id}           delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(stories::router())
        .merge(children::router())
        .merge(custom_illustrations::router())
}
