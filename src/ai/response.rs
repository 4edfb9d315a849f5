//! Vendor response parsing and the CET6 re-wrap.

use chrono::Utc;

use crate::core::models::{
    CanonicalEnvelope, ChatCompletionResponse, ChatMessage, EnvelopeChoice, EnvelopeUsage,
    PLACEHOLDER_COMPLETION_TOKENS, PLACEHOLDER_PROMPT_TOKENS, PLACEHOLDER_TOTAL_TOKENS, Role,
};
use crate::errors::RelayError;

/// Text substituted when a lenient route gets a response without content
pub const NO_CONTENT_SENTINEL: &str = "未生成有效内容";

/// What to do when the response parses but carries no generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsePolicy {
    /// Fail with [`RelayError::MissingContent`].
    Strict,
    /// Substitute the given text.
    Fallback(&'static str),
}

/// Extracts `choices[0].message.content` from a raw vendor body.
///
/// Malformed JSON is always an error, regardless of `policy`.
pub fn extract_content(body: &str, policy: ParsePolicy) -> Result<String, RelayError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| RelayError::VendorResponseParse(format!("{e}; body: {body}")))?;

    match (parsed.first_content(), policy) {
        (Some(content), _) => Ok(content.to_string()),
        (None, ParsePolicy::Strict) => Err(RelayError::MissingContent),
        (None, ParsePolicy::Fallback(sentinel)) => Ok(sentinel.to_string()),
    }
}

impl CanonicalEnvelope {
    /// Builds a fresh single-choice completion around `text`.
    pub fn wrap(text: impl Into<String>, model: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: format!("chat-{}", now.timestamp_millis()),
            object: "chat.completion".to_string(),
            created: now.timestamp(),
            model: model.into(),
            choices: vec![EnvelopeChoice {
                index: 0,
                message: ChatMessage {
                    role: Role::Assistant,
                    content: text.into(),
                },
                finish_reason: "stop".to_string(),
            }],
            usage: EnvelopeUsage {
                prompt_tokens: PLACEHOLDER_PROMPT_TOKENS,
                completion_tokens: PLACEHOLDER_COMPLETION_TOKENS,
                total_tokens: PLACEHOLDER_TOTAL_TOKENS,
            },
        }
    }

    pub fn to_json(&self) -> Result<String, RelayError> {
        serde_json::to_string(self)
            .map_err(|e| RelayError::Internal(format!("Failed to serialize envelope: {e}")))
    }
}
