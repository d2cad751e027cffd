//! Domain core for the Storynest story-generation platform.
//!
//! Pure types and logic shared by every other crate: reading-level policy,
//! character description for illustration prompts, story prompt assembly,
//! model-output parsing, and the service ports implemented by the
//! `storynest-genai` and `storynest-storage` crates.

pub mod characteristics;
pub mod error;
pub mod ports;
pub mod prompt;
pub mod reading_level;
pub mod story;
pub mod types;
