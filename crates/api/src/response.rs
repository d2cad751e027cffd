//! Shared response envelope types for API handlers.
//!
//! CRUD responses use a `{ "data": ... }` envelope. The story-generation
//! endpoint is the exception: its flat payload shape is a wire contract
//! (see [`crate::handlers::generate`]).

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
