use std::sync::Arc;

use crate::ai::{ChatTransport, CompletionSettings, Gateway, HttpRelay, ParsePolicy};
use crate::core::config::AppConfig;
use crate::errors::RelayError;
use crate::prompt::{PromptKind, PromptRequest, TemplateParams};

pub const TEMPERATURE: f32 = 0.7;
pub const MAX_TOKENS: u32 = 2000;

/// General learning features. Every method returns the generated text or
/// fails; there is no fallback text on this path.
#[derive(Clone)]
pub struct AigcService {
    gateway: Gateway,
}

impl AigcService {
    pub fn from_config(config: &AppConfig) -> Result<Self, RelayError> {
        let relay = HttpRelay::new(&config.aigc, config.request_timeout)?;
        Ok(Self::with_transport(
            Arc::new(relay),
            config.aigc.model.clone(),
            config.max_input_chars,
        ))
    }

    pub fn with_transport(
        transport: Arc<dyn ChatTransport>,
        model: String,
        max_input_chars: usize,
    ) -> Self {
        let settings = CompletionSettings {
            model,
            temperature: Some(TEMPERATURE),
            max_tokens: Some(MAX_TOKENS),
        };
        Self {
            gateway: Gateway::new(transport, settings, max_input_chars),
        }
    }

    async fn run(&self, request: PromptRequest) -> Result<String, RelayError> {
        self.gateway.invoke(&request, ParsePolicy::Strict).await
    }

    /// Free-form chat; the message is sent as-is.
    pub async fn chat(&self, message: &str) -> Result<String, RelayError> {
        self.run(PromptRequest::new(PromptKind::Chat, message)).await
    }

    pub async fn explain_word(&self, word: &str) -> Result<String, RelayError> {
        self.run(PromptRequest::new(PromptKind::ExplainWord, word)).await
    }

    pub async fn generate_learning_content(&self, topic: &str) -> Result<String, RelayError> {
        self.run(PromptRequest::new(PromptKind::GenerateLearning, topic)).await
    }

    pub async fn comprehensive_explanation(
        &self,
        word: &str,
        level: Option<&str>,
    ) -> Result<String, RelayError> {
        self.run(
            PromptRequest::new(PromptKind::ComprehensiveExplanation, word)
                .with_params(TemplateParams::new().with_opt("level", level)),
        )
        .await
    }

    pub async fn listening_script(
        &self,
        topic: &str,
        difficulty: Option<&str>,
    ) -> Result<String, RelayError> {
        self.run(
            PromptRequest::new(PromptKind::ListeningScript, topic)
                .with_params(TemplateParams::new().with_opt("difficulty", difficulty)),
        )
        .await
    }

    pub async fn reading_material(
        &self,
        topic: &str,
        difficulty: Option<&str>,
    ) -> Result<String, RelayError> {
        self.run(
            PromptRequest::new(PromptKind::ReadingMaterial, topic)
                .with_params(TemplateParams::new().with_opt("difficulty", difficulty)),
        )
        .await
    }

    pub async fn writing_guide(
        &self,
        essay_type: Option<&str>,
        topic: &str,
    ) -> Result<String, RelayError> {
        self.run(
            PromptRequest::new(PromptKind::WritingGuide, topic)
                .with_params(TemplateParams::new().with_opt("essay_type", essay_type)),
        )
        .await
    }

    pub async fn writing_feedback(
        &self,
        text: &str,
        focus_area: Option<&str>,
    ) -> Result<String, RelayError> {
        self.run(
            PromptRequest::new(PromptKind::WritingFeedback, text)
                .with_params(TemplateParams::new().with_opt("focus_area", focus_area)),
        )
        .await
    }

    pub async fn pronunciation_guide(&self, word: &str) -> Result<String, RelayError> {
        self.run(PromptRequest::new(PromptKind::PronunciationGuide, word)).await
    }

    pub async fn explain_grammar(&self, topic: &str) -> Result<String, RelayError> {
        self.run(PromptRequest::new(PromptKind::GrammarExplanation, topic)).await
    }

    pub async fn conversation_practice(
        &self,
        scenario: &str,
        level: Option<&str>,
    ) -> Result<String, RelayError> {
        self.run(
            PromptRequest::new(PromptKind::ConversationPractice, scenario)
                .with_params(TemplateParams::new().with_opt("level", level)),
        )
        .await
    }

    pub async fn quiz(
        &self,
        topic: &str,
        question_count: Option<u32>,
        difficulty: Option<&str>,
    ) -> Result<String, RelayError> {
        let params = TemplateParams::new()
            .with_opt("question_count", question_count.map(|n| n.to_string()))
            .with_opt("difficulty", difficulty);
        self.run(PromptRequest::new(PromptKind::Quiz, topic).with_params(params)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ChatCompletionRequest;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Canned {
        body: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ChatTransport for Canned {
        async fn send(&self, _request: &ChatCompletionRequest) -> Result<String, RelayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.to_string())
        }
    }

    fn service(body: &'static str) -> (AigcService, Arc<Canned>) {
        let canned = Arc::new(Canned {
            body,
            calls: AtomicUsize::new(0),
        });
        let svc = AigcService::with_transport(canned.clone(), "m".to_string(), 2000);
        (svc, canned)
    }

    async fn all_features(svc: &AigcService) -> Vec<Result<String, RelayError>> {
        vec![
            svc.chat("hi").await,
            svc.explain_word("apple").await,
            svc.generate_learning_content("travel").await,
            svc.comprehensive_explanation("apple", Some("beginner")).await,
            svc.listening_script("travel", Some("easy")).await,
            svc.reading_material("space", Some("hard")).await,
            svc.writing_guide(Some("email"), "holiday").await,
            svc.writing_feedback("I goes home.", Some("grammar")).await,
            svc.pronunciation_guide("thorough").await,
            svc.explain_grammar("Present Perfect").await,
            svc.conversation_practice("airport", Some("beginner")).await,
            svc.quiz("animals", Some(5), Some("easy")).await,
        ]
    }

    #[tokio::test]
    async fn every_feature_extracts_the_content() {
        let (svc, canned) = service(r#"{"choices":[{"message":{"content":"hello"}}]}"#);
        let results = all_features(&svc).await;
        let count = results.len();
        for result in results {
            assert_eq!(result.unwrap(), "hello");
        }
        assert_eq!(canned.calls.load(Ordering::SeqCst), count);
    }

    #[tokio::test]
    async fn every_feature_fails_on_empty_choices() {
        let (svc, _) = service(r#"{"choices":[]}"#);
        for result in all_features(&svc).await {
            assert!(matches!(result, Err(RelayError::MissingContent)));
        }
    }

    #[tokio::test]
    async fn missing_secondary_param_is_rejected_before_sending() {
        let (svc, canned) = service(r#"{"choices":[{"message":{"content":"hello"}}]}"#);
        let err = svc.listening_script("travel", None).await.unwrap_err();
        assert!(matches!(err, RelayError::TemplateParameter("difficulty")));
        assert_eq!(canned.calls.load(Ordering::SeqCst), 0);
    }
}
