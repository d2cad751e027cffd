//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /register   create an account
/// POST /login      exchange credentials for an access token
/// GET  /me         current user info (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/auth",
        Router::new()
            .route("/register", post(auth::register))
            .route("/login", post(auth::login))
            .route("/me", get(auth::me)),
    )
}
