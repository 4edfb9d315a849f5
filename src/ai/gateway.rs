use std::sync::Arc;
use tracing::{debug, info};

use super::client::ChatTransport;
use super::response::{ParsePolicy, extract_content};
use crate::core::models::{ChatCompletionRequest, ChatMessage};
use crate::errors::RelayError;
use crate::prompt::{PromptRequest, render, validate_input, validate_params};

/// Sampling settings sent with every request of one gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// validate -> render -> relay -> parse, once per invocation.
#[derive(Clone)]
pub struct Gateway {
    transport: Arc<dyn ChatTransport>,
    settings: CompletionSettings,
    max_input_chars: usize,
}

impl Gateway {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        settings: CompletionSettings,
        max_input_chars: usize,
    ) -> Self {
        Self {
            transport,
            settings,
            max_input_chars,
        }
    }

    /// Wraps a rendered prompt into a single-user-message request.
    #[must_use]
    pub fn build_request(&self, prompt: String) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.settings.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        }
    }

    /// # Errors
    ///
    /// `InvalidInput` and `TemplateParameter` are returned before any
    /// network call is made. Both the primary input and every secondary
    /// parameter are bounded.
    pub async fn invoke(
        &self,
        request: &PromptRequest,
        policy: ParsePolicy,
    ) -> Result<String, RelayError> {
        validate_input(request.kind, &request.raw_input, self.max_input_chars)?;
        validate_params(request)?;
        let prompt = render(request)?;

        #[cfg(feature = "debug-logs")]
        debug!("Rendered {} prompt:\n{}", request.kind.name(), prompt);

        #[cfg(not(feature = "debug-logs"))]
        debug!(
            kind = request.kind.name(),
            chars = prompt.chars().count(),
            "Rendered prompt"
        );

        let body = self.transport.send(&self.build_request(prompt)).await?;
        let text = extract_content(&body, policy)?;

        info!(
            kind = request.kind.name(),
            chars = text.chars().count(),
            "Vendor returned generated text"
        );
        Ok(text)
    }
}
