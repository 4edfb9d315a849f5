use std::sync::Arc;

use crate::ai::{
    ChatTransport, CompletionSettings, Gateway, HttpRelay, NO_CONTENT_SENTINEL, ParsePolicy,
};
use crate::core::config::AppConfig;
use crate::core::models::CanonicalEnvelope;
use crate::errors::RelayError;
use crate::prompt::{PromptKind, PromptRequest};

pub const MAX_TOKENS: u32 = 2000;

/// CET6 exam features.
///
/// Results are re-wrapped into a fresh chat-completion document because the
/// CET6 frontend reads `choices[0].message.content`. A vendor response without
/// content yields [`NO_CONTENT_SENTINEL`] inside the envelope instead of an
/// error; malformed JSON still fails.
#[derive(Clone)]
pub struct Cet6Service {
    gateway: Gateway,
    envelope_model: String,
}

impl Cet6Service {
    pub fn from_config(config: &AppConfig) -> Result<Self, RelayError> {
        let relay = HttpRelay::new(&config.cet6, config.request_timeout)?;
        Ok(Self::with_transport(
            Arc::new(relay),
            config.cet6.model.clone(),
            config.envelope_model.clone(),
            config.max_input_chars,
        ))
    }

    pub fn with_transport(
        transport: Arc<dyn ChatTransport>,
        model: String,
        envelope_model: String,
        max_input_chars: usize,
    ) -> Self {
        let settings = CompletionSettings {
            model,
            temperature: None,
            max_tokens: Some(MAX_TOKENS),
        };
        Self {
            gateway: Gateway::new(transport, settings, max_input_chars),
            envelope_model,
        }
    }

    async fn run(&self, kind: PromptKind, input: &str) -> Result<String, RelayError> {
        let text = self
            .gateway
            .invoke(
                &PromptRequest::new(kind, input),
                ParsePolicy::Fallback(NO_CONTENT_SENTINEL),
            )
            .await?;
        CanonicalEnvelope::wrap(text, self.envelope_model.as_str()).to_json()
    }

    pub async fn vocab_explanation(&self, word: &str) -> Result<String, RelayError> {
        self.run(PromptKind::Cet6Vocab, word).await
    }

    pub async fn parse_sentence(&self, sentence: &str) -> Result<String, RelayError> {
        self.run(PromptKind::Cet6Sentence, sentence).await
    }

    pub async fn correct_essay(&self, essay: &str) -> Result<String, RelayError> {
        self.run(PromptKind::Cet6Essay, essay).await
    }

    pub async fn translation_practice(&self, chinese_text: &str) -> Result<String, RelayError> {
        self.run(PromptKind::Cet6Translation, chinese_text).await
    }
}
