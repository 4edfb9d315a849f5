//! All vendor-facing functionality

pub mod client;
pub mod gateway;
pub mod response;

// Re-export main types for convenience
pub use client::{ChatTransport, HttpRelay};
pub use gateway::{CompletionSettings, Gateway};
pub use response::{NO_CONTENT_SENTINEL, ParsePolicy, extract_content};
