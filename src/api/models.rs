//! Request bodies. Missing text fields deserialize as empty strings so that
//! they are rejected by validation with a readable message.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ChatBody {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct WordBody {
    #[serde(default)]
    pub word: String,
}

#[derive(Debug, Deserialize)]
pub struct TopicBody {
    #[serde(default)]
    pub topic: String,
}

#[derive(Debug, Deserialize)]
pub struct LeveledWordBody {
    #[serde(default)]
    pub word: String,
    pub level: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GradedTopicBody {
    #[serde(default)]
    pub topic: String,
    pub difficulty: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingGuideBody {
    pub essay_type: Option<String>,
    #[serde(default)]
    pub topic: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingFeedbackBody {
    #[serde(default)]
    pub text: String,
    pub focus_area: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConversationBody {
    #[serde(default)]
    pub scenario: String,
    pub level: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizBody {
    #[serde(default)]
    pub topic: String,
    pub question_count: Option<u32>,
    pub difficulty: Option<String>,
}

// CET6 form parameters. Each is read from the form body, or from the query
// string when the body does not carry it.

/// The text field a CET6 form exists to carry.
pub trait Cet6Input {
    fn text(&self) -> &str;

    fn is_blank(&self) -> bool {
        self.text().trim().is_empty()
    }
}

#[derive(Debug, Deserialize)]
pub struct VocabForm {
    #[serde(default)]
    pub word: String,
}

#[derive(Debug, Deserialize)]
pub struct SentenceForm {
    #[serde(default)]
    pub sentence: String,
}

#[derive(Debug, Deserialize)]
pub struct EssayForm {
    #[serde(default)]
    pub essay: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationForm {
    #[serde(default)]
    pub chinese_text: String,
}

impl Cet6Input for VocabForm {
    fn text(&self) -> &str {
        &self.word
    }
}

impl Cet6Input for SentenceForm {
    fn text(&self) -> &str {
        &self.sentence
    }
}

impl Cet6Input for EssayForm {
    fn text(&self) -> &str {
        &self.essay
    }
}

impl Cet6Input for TranslationForm {
    fn text(&self) -> &str {
        &self.chinese_text
    }
}
