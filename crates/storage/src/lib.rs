//! Object-storage implementation of the [`storynest_core::ports::ObjectStore`]
//! port, backed by S3, plus collision-resistant key generation.

pub mod key;
pub mod s3;

pub use s3::S3ObjectStore;

/// Cache directive for immutable generated assets. Stored objects are
/// content-addressed by their unique key, so clients may cache forever.
pub const IMMUTABLE_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";
