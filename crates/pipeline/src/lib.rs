//! Story-generation orchestration.
//!
//! One [`story::StoryPipeline`] instance serves the whole process. Each
//! request flows linearly: build the prompt, call the text model once,
//! parse the embedded JSON, then (when illustration is configured) fan out
//! over the returned illustration descriptions, and assemble the response.
//! There is no state shared between requests and no retry at any stage.

pub mod story;

pub use story::{Illustrator, PipelineError, StoryPipeline};
