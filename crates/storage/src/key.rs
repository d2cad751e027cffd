//! Storage-key generation.
//!
//! Keys combine a millisecond timestamp with a random token, which keeps
//! them collision-resistant without any coordination and keeps listings
//! roughly chronological.

use rand::Rng;

/// Prefix for story illustrations produced by the generation pipeline.
const ILLUSTRATION_PREFIX: &str = "illustrations";

/// Prefix for user-uploaded custom illustrations.
const CUSTOM_ILLUSTRATION_PREFIX: &str = "custom-illustrations";

/// 48-bit random token rendered as 12 hex characters.
fn random_token() -> String {
    let token: u64 = rand::rng().random::<u64>() & 0xFFFF_FFFF_FFFF;
    format!("{token:012x}")
}

fn timestamped_key(prefix: &str, extension: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    format!("{prefix}/{millis}-{}.{extension}", random_token())
}

/// Key for one generated story illustration (always PNG).
pub fn illustration_key() -> String {
    timestamped_key(ILLUSTRATION_PREFIX, "png")
}

/// Key for an uploaded custom illustration with the given file extension.
pub fn custom_illustration_key(extension: &str) -> String {
    timestamped_key(CUSTOM_ILLUSTRATION_PREFIX, extension)
}
