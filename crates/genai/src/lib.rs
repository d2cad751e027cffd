//! Clients for the hosted generation services.
//!
//! [`AnthropicClient`] implements the text-generation port against the
//! Anthropic Messages API; [`OpenAiImageClient`] implements the
//! image-generation port against the OpenAI Images API. Both are thin
//! reqwest wrappers constructed from explicit credentials -- neither reads
//! the process environment.

pub mod anthropic;
pub mod openai;

pub use anthropic::AnthropicClient;
pub use openai::OpenAiImageClient;
