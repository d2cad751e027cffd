use std::sync::Arc;

use storynest_core::ports::ObjectStore;
use storynest_pipeline::StoryPipeline;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: storynest_db::DbPool,
    /// Server configuration (JWT secret, timeouts, CORS).
    pub config: Arc<ServerConfig>,
    /// Story-generation pipeline; `None` when the text-generation service
    /// key is not configured, in which case generation requests answer 500.
    pub story: Option<Arc<StoryPipeline>>,
    /// Object store for custom-illustration uploads; `None` when storage is
    /// not configured.
    pub media_store: Option<Arc<dyn ObjectStore>>,
}
