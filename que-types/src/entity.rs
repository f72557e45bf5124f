use crate::{JSON_KEY_INSTRUCTION, JSON_KEY_KEY, JSON_KEY_QUESTION, QuestionRecord, RecordError};

/// The basis data every question carries, whatever its layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionEntity {
    /// The key the answer is logged under.
    key: String,

    /// The question text shown to the user.
    question: String,

    /// Additional instructions shown below the question (may be empty).
    instruction: String,

    /// The layout type this question was dispatched on.
    layout_type: String,
}

impl QuestionEntity {
    /// Create a new entity.
    pub fn new(
        key: impl Into<String>,
        question: impl Into<String>,
        instruction: impl Into<String>,
        layout_type: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            question: question.into(),
            instruction: instruction.into(),
            layout_type: layout_type.into(),
        }
    }

    /// Read the basis entity from a record.
    ///
    /// `key`, `question` and `type` are required; `instruction` defaults to
    /// the empty string.
    pub fn from_record(record: &QuestionRecord) -> Result<Self, RecordError> {
        Ok(Self {
            key: record.get_str(JSON_KEY_KEY)?.to_string(),
            question: record.get_str(JSON_KEY_QUESTION)?.to_string(),
            instruction: record
                .opt_str(JSON_KEY_INSTRUCTION)?
                .unwrap_or_default()
                .to_string(),
            layout_type: record.record_type()?.to_string(),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn layout_type(&self) -> &str {
        &self.layout_type
    }
}
