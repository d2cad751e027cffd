//! The story pipeline: prompt → text model → parse → illustrate → assemble.

use std::sync::Arc;

use base64::Engine as _;
use futures::future::join_all;

use storynest_core::characteristics::PhysicalCharacteristics;
use storynest_core::ports::{
    GenAiError, ImageGenerator, ObjectStore, ReferenceImage, StorageError, TextGenerator,
};
use storynest_core::prompt::{build_illustration_prompt, build_story_prompt};
use storynest_core::story::{
    extract_story_json, GeneratedStory, IllustrationResult, IllustrationSpec, StoryParseError,
    StoryRequest, StoryWarning,
};
use storynest_storage::{key, IMMUTABLE_CACHE_CONTROL};

/// Image generation plus durable storage, present only when both services
/// are configured.
pub struct Illustrator {
    pub images: Arc<dyn ImageGenerator>,
    pub store: Arc<dyn ObjectStore>,
}

/// Errors terminating a generation request.
///
/// Illustration failures never appear here -- they degrade to entries
/// without an image URL (plus at most a response-level warning).
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The model's reply contained no parseable JSON object.
    #[error("Failed to parse story response")]
    UnparseableResponse,

    /// The parsed object lacked a usable title or content.
    #[error("Invalid story format")]
    InvalidStoryFormat,

    /// The text-generation call itself failed.
    #[error("Text generation failed: {0}")]
    TextService(#[from] GenAiError),
}

impl From<StoryParseError> for PipelineError {
    fn from(err: StoryParseError) -> Self {
        match err {
            StoryParseError::Unparseable => PipelineError::UnparseableResponse,
            StoryParseError::InvalidFormat => PipelineError::InvalidStoryFormat,
        }
    }
}

/// Why one illustration attempt produced no image.
#[derive(Debug, thiserror::Error)]
enum IllustrationFailure {
    #[error(transparent)]
    Generation(#[from] GenAiError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl IllustrationFailure {
    fn is_content_policy(&self) -> bool {
        matches!(
            self,
            IllustrationFailure::Generation(GenAiError::ContentPolicy(_))
        )
    }
}

/// Stateless orchestrator for story generation.
///
/// Holds only the service ports; every request is independent. Constructed
/// once at startup from explicit configuration.
pub struct StoryPipeline {
    text: Arc<dyn TextGenerator>,
    illustrator: Option<Illustrator>,
    fetch_client: reqwest::Client,
}

impl StoryPipeline {
    pub fn new(text: Arc<dyn TextGenerator>, illustrator: Option<Illustrator>) -> Self {
        Self {
            text,
            illustrator,
            fetch_client: reqwest::Client::new(),
        }
    }

    /// Whether illustration rendering is configured (vs. the degraded
    /// descriptions-only mode).
    pub fn illustrations_enabled(&self) -> bool {
        self.illustrator.is_some()
    }

    /// Run the full pipeline for one request.
    pub async fn generate(&self, request: &StoryRequest) -> Result<GeneratedStory, PipelineError> {
        let prompt = build_story_prompt(request);

        let reference_image = match &request.source_illustration {
            Some(source) => self.fetch_reference_image(&source.url).await,
            None => None,
        };

        let raw = self.text.generate(&prompt, reference_image.as_ref()).await?;
        let parsed = extract_story_json(&raw)?;

        tracing::info!(
            title = %parsed.title,
            illustrations = parsed.illustrations.len(),
            "Story text generated"
        );

        let (illustrations, warning) = match &self.illustrator {
            Some(illustrator) => {
                self.resolve_illustrations(
                    illustrator,
                    &parsed.illustrations,
                    request.physical_characteristics.as_ref(),
                )
                .await
            }
            // Degraded mode: descriptions only, not an error.
            None => (
                parsed
                    .illustrations
                    .iter()
                    .map(|spec| IllustrationResult {
                        description: spec.description.clone(),
                        position: spec.position,
                        image_url: None,
                    })
                    .collect(),
                None,
            ),
        };

        Ok(GeneratedStory {
            title: parsed.title,
            content: parsed.content,
            illustrations,
            warning,
        })
    }

    /// Fetch and base64-encode the source illustration.
    ///
    /// A failed fetch degrades to text-only generation; the prompt already
    /// carries the textual inspiration instruction.
    async fn fetch_reference_image(&self, url: &str) -> Option<ReferenceImage> {
        let response = match self.fetch_client.get(url).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::warn!(url, status = %response.status(), "Source illustration fetch failed");
                return None;
            }
            Err(err) => {
                tracing::warn!(url, error = %err, "Source illustration fetch failed");
                return None;
            }
        };

        let media_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
            .filter(|v| v.starts_with("image/"))
            .unwrap_or_else(|| "image/png".to_string());

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(url, error = %err, "Source illustration body read failed");
                return None;
            }
        };

        Some(ReferenceImage {
            media_type,
            data_base64: base64::engine::general_purpose::STANDARD.encode(&bytes),
        })
    }

    /// Render and store every illustration concurrently.
    ///
    /// All attempts are awaited to completion (no early return) and results
    /// are paired with their source description by position, so the output
    /// order matches the model's order regardless of completion order. Any
    /// single failure yields a `None` URL for that entry only; a
    /// content-policy refusal additionally sets the response warning.
    async fn resolve_illustrations(
        &self,
        illustrator: &Illustrator,
        specs: &[IllustrationSpec],
        characteristics: Option<&PhysicalCharacteristics>,
    ) -> (Vec<IllustrationResult>, Option<StoryWarning>) {
        let attempts = specs.iter().map(|spec| {
            let prompt = build_illustration_prompt(&spec.description, characteristics);
            async move {
                match resolve_one(illustrator, &prompt).await {
                    Ok(url) => (Some(url), false),
                    Err(failure) => {
                        tracing::warn!(
                            description = %spec.description,
                            error = %failure,
                            "Illustration attempt failed"
                        );
                        (None, failure.is_content_policy())
                    }
                }
            }
        });

        let settled = join_all(attempts).await;

        let content_policy_hit = settled.iter().any(|(_, rejected)| *rejected);
        let results = specs
            .iter()
            .zip(settled)
            .map(|(spec, (image_url, _))| IllustrationResult {
                description: spec.description.clone(),
                position: spec.position,
                image_url,
            })
            .collect();

        let warning = content_policy_hit.then_some(StoryWarning::IllustrationContentPolicy);
        (results, warning)
    }
}

/// One illustration attempt: generate, then store under a fresh key.
async fn resolve_one(
    illustrator: &Illustrator,
    prompt: &str,
) -> Result<String, IllustrationFailure> {
    let bytes = illustrator.images.generate(prompt).await?;
    let key = key::illustration_key();
    let url = illustrator
        .store
        .put(&key, bytes, "image/png", IMMUTABLE_CACHE_CONTROL)
        .await?;
    Ok(url)
}
