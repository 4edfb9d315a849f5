//! Input validation and prompt templates for every learning feature.

use std::collections::BTreeMap;

use crate::errors::RelayError;

/// Default maximum number of characters accepted for a user input
pub const MAX_INPUT_CHARS: usize = 2000;

/// Maximum number of characters accepted for any secondary template parameter
pub const MAX_PARAM_CHARS: usize = 100;

/// Fixed set of prompt templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    Chat,
    ExplainWord,
    GenerateLearning,
    ComprehensiveExplanation,
    ListeningScript,
    ReadingMaterial,
    WritingGuide,
    WritingFeedback,
    PronunciationGuide,
    GrammarExplanation,
    ConversationPractice,
    Quiz,
    Cet6Vocab,
    Cet6Sentence,
    Cet6Essay,
    Cet6Translation,
}

impl PromptKind {
    pub const ALL: [PromptKind; 16] = [
        PromptKind::Chat,
        PromptKind::ExplainWord,
        PromptKind::GenerateLearning,
        PromptKind::ComprehensiveExplanation,
        PromptKind::ListeningScript,
        PromptKind::ReadingMaterial,
        PromptKind::WritingGuide,
        PromptKind::WritingFeedback,
        PromptKind::PronunciationGuide,
        PromptKind::GrammarExplanation,
        PromptKind::ConversationPractice,
        PromptKind::Quiz,
        PromptKind::Cet6Vocab,
        PromptKind::Cet6Sentence,
        PromptKind::Cet6Essay,
        PromptKind::Cet6Translation,
    ];

    /// Name used in logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PromptKind::Chat => "chat",
            PromptKind::ExplainWord => "explain_word",
            PromptKind::GenerateLearning => "generate_learning",
            PromptKind::ComprehensiveExplanation => "comprehensive_explanation",
            PromptKind::ListeningScript => "listening_script",
            PromptKind::ReadingMaterial => "reading_material",
            PromptKind::WritingGuide => "writing_guide",
            PromptKind::WritingFeedback => "writing_feedback",
            PromptKind::PronunciationGuide => "pronunciation_guide",
            PromptKind::GrammarExplanation => "grammar_explanation",
            PromptKind::ConversationPractice => "conversation_practice",
            PromptKind::Quiz => "quiz",
            PromptKind::Cet6Vocab => "cet6_vocab",
            PromptKind::Cet6Sentence => "cet6_sentence",
            PromptKind::Cet6Essay => "cet6_essay",
            PromptKind::Cet6Translation => "cet6_translation",
        }
    }

    /// Human-readable label of the primary input, used in validation messages.
    #[must_use]
    pub fn input_label(self) -> &'static str {
        match self {
            PromptKind::Chat => "消息",
            PromptKind::ExplainWord
            | PromptKind::ComprehensiveExplanation
            | PromptKind::PronunciationGuide
            | PromptKind::Cet6Vocab => "单词",
            PromptKind::GenerateLearning
            | PromptKind::ListeningScript
            | PromptKind::ReadingMaterial
            | PromptKind::WritingGuide
            | PromptKind::GrammarExplanation
            | PromptKind::Quiz => "主题",
            PromptKind::WritingFeedback => "文本",
            PromptKind::ConversationPractice => "场景",
            PromptKind::Cet6Sentence => "句子",
            PromptKind::Cet6Essay => "作文",
            PromptKind::Cet6Translation => "中文文本",
        }
    }

    /// Secondary parameters the template cannot render without.
    #[must_use]
    pub fn required_params(self) -> &'static [&'static str] {
        match self {
            PromptKind::ComprehensiveExplanation | PromptKind::ConversationPractice => &["level"],
            PromptKind::ListeningScript | PromptKind::ReadingMaterial => &["difficulty"],
            PromptKind::WritingGuide => &["essay_type"],
            PromptKind::WritingFeedback => &["focus_area"],
            PromptKind::Quiz => &["question_count", "difficulty"],
            _ => &[],
        }
    }
}

/// Named string parameters substituted into a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateParams(BTreeMap<&'static str, String>);

impl TemplateParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.0.insert(name, value.into());
        self
    }

    /// Adds the parameter only when a value is present.
    #[must_use]
    pub fn with_opt(self, name: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.with(name, v),
            None => self,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    fn require(&self, name: &'static str) -> Result<&str, RelayError> {
        self.get(name)
            .filter(|v| !v.trim().is_empty())
            .ok_or(RelayError::TemplateParameter(name))
    }
}

/// One feature invocation before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub kind: PromptKind,
    pub raw_input: String,
    pub params: TemplateParams,
}

impl PromptRequest {
    pub fn new(kind: PromptKind, raw_input: impl Into<String>) -> Self {
        Self {
            kind,
            raw_input: raw_input.into(),
            params: TemplateParams::new(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: TemplateParams) -> Self {
        self.params = params;
        self
    }
}

/// Rejects blank input and input longer than `max_chars` characters.
///
/// Returns the input unchanged when it passes.
pub fn validate_input<'a>(
    kind: PromptKind,
    raw: &'a str,
    max_chars: usize,
) -> Result<&'a str, RelayError> {
    let label = kind.input_label();
    if raw.trim().is_empty() {
        return Err(RelayError::InvalidInput(format!("{label}不能为空")));
    }

    if raw.chars().count() > max_chars {
        return Err(RelayError::InvalidInput(format!(
            "{label}过长，最多{max_chars}个字符"
        )));
    }

    Ok(raw)
}

/// Checks the secondary parameters of `request`.
///
/// Every parameter the template needs must be present and non-blank, and no
/// parameter may exceed [`MAX_PARAM_CHARS`] characters.
pub fn validate_params(request: &PromptRequest) -> Result<(), RelayError> {
    for &name in request.kind.required_params() {
        request.params.require(name)?;
    }

    for (name, value) in &request.params.0 {
        if value.chars().count() > MAX_PARAM_CHARS {
            return Err(RelayError::InvalidInput(format!(
                "参数{name}过长，最多{MAX_PARAM_CHARS}个字符"
            )));
        }
    }

    Ok(())
}

/// Renders the final instruction sent to the model.
pub fn render(request: &PromptRequest) -> Result<String, RelayError> {
    let input = request.raw_input.as_str();
    let p = &request.params;

    let prompt = match request.kind {
        PromptKind::Chat => input.to_string(),
        PromptKind::ExplainWord => {
            format!("请用中文简明扼要地解释英文单词 '{input}' 的含义，不超过50字。")
        }
        PromptKind::GenerateLearning => format!(
            "请为学习英语的学生生成关于 '{input}' 的学习材料，包括定义、例句和使用建议，不超过200字。"
        ),
        PromptKind::ComprehensiveExplanation => format!(
            "为英文单词 '{input}' 生成详细的学习资料（难度级别：{level}），内容应包括：\n\
             1. 中英文定义\n\
             2. 词性和词根\n\
             3. 2-3个英文例句\n\
             4. 同义词\n\
             5. 反义词\n\
             6. 实用用法建议\n\
             请用JSON格式返回，包括 definition, examples, synonyms, antonyms, tips 字段。",
            level = p.require("level")?
        ),
        PromptKind::ListeningScript => format!(
            "为英文学习者生成一份听力练习脚本（主题：{input}，难度：{difficulty}），要求：\n\
             1. 100-150个单词\n\
             2. 使用简洁清晰的英文\n\
             3. 包含常见词汇\n\
             4. 配上中文翻译\n",
            difficulty = p.require("difficulty")?
        ),
        PromptKind::ReadingMaterial => format!(
            "为英文学习者创建一份阅读理解材料（主题：{input}，难度：{difficulty}）\n\
             要求：\n\
             1. 200-300个单词的短文\n\
             2. 有趣且教育性\n\
             3. 包含3-5个理解问题\n\
             4. 标注关键词汇\n",
            difficulty = p.require("difficulty")?
        ),
        PromptKind::WritingGuide => format!(
            "为英文学习者提供{essay_type}的写作指导（主题：{input}）\n\
             包括：\n\
             1. 结构框架\n\
             2. 常用短语和表达\n\
             3. 示例段落\n\
             4. 避免常见错误\n\
             5. 检查清单\n",
            essay_type = p.require("essay_type")?
        ),
        PromptKind::WritingFeedback => format!(
            "请批改以下英文文本，重点关注{focus_area}问题：\n\n{input}\n\n\
             请提供：\n\
             1. 具体的错误指正\n\
             2. 改进的版本\n\
             3. 语法和词汇解释\n\
             4. 整体反馈\n",
            focus_area = p.require("focus_area")?
        ),
        PromptKind::PronunciationGuide => format!(
            "为英文单词 '{input}' 提供发音指导。包括：\n\
             1. 国际音标（IPA）\n\
             2. 中文发音指导\n\
             3. 音节划分\n\
             4. 容易犯的错误\n\
             5. 练习建议\n"
        ),
        PromptKind::GrammarExplanation => format!(
            "为英文学习者详细讲解 '{input}'，包括：\n\
             1. 定义和概念\n\
             2. 形成规则\n\
             3. 5个实际例句\n\
             4. 与类似语法的对比\n\
             5. 常见错误\n\
             6. 练习题（3-5题）\n"
        ),
        PromptKind::ConversationPractice => format!(
            "生成一份英文口语对话练习（场景：{input}，难度：{level}）\n\
             格式：\n\
             Speaker A: ...\n\
             Speaker B: ...\n\
             包含：\n\
             1. 实用的日常表达\n\
             2. 自然的对话流程\n\
             3. 关键短语标注\n\
             4. 中文翻译\n",
            level = p.require("level")?
        ),
        PromptKind::Quiz => format!(
            "为主题 '{input}' 生成{count}道英文题目（难度：{difficulty}）\n\
             格式：\n\
             Q1. [题目]\nA) [选项]\nB) [选项]\nC) [选项]\nD) [选项]\n\n\
             最后提供答案key。\n\
             题目类型可包括：选择题、填空、配对等\n",
            count = p.require("question_count")?,
            difficulty = p.require("difficulty")?
        ),
        PromptKind::Cet6Vocab => format!(
            "请详细解释以下英语单词，包括音标、词性、常见释义、搭配用法和例句，适合英语六级学习者：{input}"
        ),
        PromptKind::Cet6Sentence => format!(
            "请分析以下复杂英语句子的结构、语法要点和中文含义，适合英语六级学习者：{input}"
        ),
        PromptKind::Cet6Essay => format!(
            "请批改以下英语作文，指出语法错误、表达问题和改进建议，适合英语六级学习者：{input}"
        ),
        PromptKind::Cet6Translation => format!(
            "请将以下中文句子翻译成地道的英语，适合英语六级学习者：{input}"
        ),
    };

    Ok(prompt)
}
