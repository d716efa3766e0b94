use crate::{FieldKind, QuestionId};

/// Error type for loading form state and mutating answers.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// The embedded form definition is not valid JSON of the expected shape.
    #[error("Invalid form definition: {0}")]
    InvalidDefinition(#[source] serde_json::Error),

    /// The embedded answers are not a JSON object.
    #[error("Invalid saved answers: {0}")]
    InvalidAnswers(String),

    /// A question has no usable identifier.
    #[error("Question #{} is missing a required ID", .index + 1)]
    MissingQuestionId { index: usize },

    /// Two questions share an identifier.
    #[error("Duplicate question ID: {0}")]
    DuplicateQuestionId(QuestionId),

    /// An answer was recorded for an identifier the form does not define.
    #[error("Unknown question: {0}")]
    UnknownQuestion(QuestionId),

    /// A choice operation was applied to a question that has no options.
    #[error("Question '{id}' is a {kind} field, not a multi-choice field")]
    NotAChoice { id: QuestionId, kind: FieldKind },
}

impl FormError {
    /// Check if this error was caused by malformed host-page input.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDefinition(_)
                | Self::InvalidAnswers(_)
                | Self::MissingQuestionId { .. }
                | Self::DuplicateQuestionId(_)
        )
    }
}
