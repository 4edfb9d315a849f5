//! StudyEnglish - an HTTP backend for English-learning features backed by an
//! OpenAI-compatible chat-completion API.
//!
//! Every feature follows the same path: validate the user's text, render it
//! into a fixed prompt template, send one chat-completion request to the
//! configured vendor, and relay the generated text.
//!
//! # Architecture
//!
//! - `prompt`: input validation and the prompt templates
//! - `ai`: vendor HTTP client, response parsing and the gateway tying them together
//! - `features`: the `/api/aigc` and `/cet6` feature façades
//! - `api`: axum routes and response envelopes
//!
//! # Example
//!
//! ```no_run
//! use studyenglish::core::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     studyenglish::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let state = studyenglish::AppState::from_config(&config)?;
//!
//!     let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
//!     axum::serve(listener, studyenglish::build_app(state)).await?;
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod ai;
pub mod api;
pub mod core;
pub mod errors;
pub mod features;
pub mod prompt;

pub use api::AppState;
pub use errors::{ErrorKind, RelayError};

/// Builds the complete HTTP application.
pub fn build_app(state: AppState) -> axum::Router {
    api::router(state)
}

/// Configure structured JSON logging.
///
/// The filter is read from `RUST_LOG` and defaults to `info`. Calling this more
/// than once is harmless; later calls leave the first subscriber in place.
///
/// # Example
///
/// ```
/// studyenglish::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
