//! Service ports implemented by the outbound-integration crates.
//!
//! The pipeline depends only on these traits, so tests run against in-memory
//! stubs and credentials never leak below the composition root.

use async_trait::async_trait;
use bytes::Bytes;

/// A base64-encoded image attached to a text-generation request.
#[derive(Debug, Clone)]
pub struct ReferenceImage {
    /// Declared media type, e.g. `image/png`.
    pub media_type: String,
    /// Base64-encoded image bytes (standard alphabet, no data-URL prefix).
    pub data_base64: String,
}

/// Failures from the generation services.
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    /// The service refused the prompt on content-policy grounds. Surfaced
    /// to callers as a non-fatal warning rather than a generic failure.
    #[error("Content policy rejection: {0}")]
    ContentPolicy(String),

    /// The service answered with a non-success status.
    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// The request never completed (connect error, timeout, bad body).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered 2xx but the body had an unexpected shape.
    #[error("Unexpected response shape: {0}")]
    UnexpectedResponse(String),
}

/// Failures from object storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Upload failed for {key}: {message}")]
    Upload { key: String, message: String },

    #[error("Delete failed for {key}: {message}")]
    Delete { key: String, message: String },
}

/// Single-shot text generation.
///
/// Implementations make exactly one outbound call per invocation and never
/// retry; transient upstream failures surface as errors for the caller to
/// report.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        reference_image: Option<&ReferenceImage>,
    ) -> Result<String, GenAiError>;
}

/// Text-to-image generation.
///
/// One square image per call at the implementation's fixed resolution. The
/// returned bytes are ready for upload; fetching any intermediate temporary
/// URL is the implementation's concern.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Bytes, GenAiError>;
}

/// Durable public object storage.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `key` and return the public URL.
    async fn put(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: &str,
        cache_control: &str,
    ) -> Result<String, StorageError>;

    /// Remove the object at `key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}
