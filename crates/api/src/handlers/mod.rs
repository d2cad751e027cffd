pub mod auth;
pub mod child;
pub mod custom_illustration;
pub mod generate;
pub mod story;
