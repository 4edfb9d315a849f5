//! HTTP surface: `/api/aigc/*` (JSON in, `{success, ...}` out) and `/cet6/*`
//! (form in, chat-completion document out).

pub mod aigc_handler;
pub mod cet6_handler;
pub mod helpers;
pub mod models;

use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::config::AppConfig;
use crate::errors::RelayError;
use crate::features::{AigcService, Cet6Service};

/// Shared, read-only per-process state.
#[derive(Clone)]
pub struct AppState {
    pub aigc: AigcService,
    pub cet6: Cet6Service,
}

impl AppState {
    /// # Errors
    ///
    /// Returns an error if a vendor HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, RelayError> {
        Ok(Self {
            aigc: AigcService::from_config(config)?,
            cet6: Cet6Service::from_config(config)?,
        })
    }
}

pub fn router(state: AppState) -> Router {
    let aigc = Router::new()
        .route("/chat", post(aigc_handler::chat))
        .route("/explain-word", post(aigc_handler::explain_word))
        .route("/generate-learning", post(aigc_handler::generate_learning))
        .route(
            "/comprehensive-explanation",
            post(aigc_handler::comprehensive_explanation),
        )
        .route("/listening-script", post(aigc_handler::listening_script))
        .route("/reading-material", post(aigc_handler::reading_material))
        .route("/writing-guide", post(aigc_handler::writing_guide))
        .route("/writing-feedback", post(aigc_handler::writing_feedback))
        .route("/pronunciation", post(aigc_handler::pronunciation))
        .route("/grammar", post(aigc_handler::grammar))
        .route("/conversation", post(aigc_handler::conversation))
        .route("/quiz", post(aigc_handler::quiz))
        .route("/health", get(aigc_handler::health));

    let cet6 = Router::new()
        .route("/vocab/explanation", post(cet6_handler::vocab_explanation))
        .route("/sentence/parse", post(cet6_handler::parse_sentence))
        .route("/essay/correct", post(cet6_handler::correct_essay))
        .route(
            "/translation/generate",
            post(cet6_handler::translation_practice),
        );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .nest("/api/aigc", aigc)
        .nest("/cet6", cet6)
        .fallback(helpers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
