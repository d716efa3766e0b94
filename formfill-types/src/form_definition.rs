use std::collections::HashSet;

use serde::Deserialize;

use crate::{FieldKind, FormError, Question, QuestionId};

/// The ordered list of questions making up a form.
///
/// Presentation-agnostic: the same definition renders step by step or as a
/// single page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormDefinition {
    /// Optional form title.
    pub title: Option<String>,

    /// All questions, in display order.
    pub questions: Vec<Question>,
}

impl FormDefinition {
    /// Create a new form definition with the given questions.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            title: None,
            questions,
        }
    }

    /// Create an empty form definition.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Parse the `{questions: [...]}` JSON embedded in the host page.
    ///
    /// Identifiers must be present and unique.
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        let raw: RawForm = serde_json::from_str(json).map_err(FormError::InvalidDefinition)?;
        raw.into_definition()
    }

    /// Get the questions.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Look up a question by identifier.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id().as_str() == id)
    }

    /// Position of a question in display order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id().as_str() == id)
    }

    /// Check if the form has any questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Get the number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Check identifier presence and uniqueness.
    pub fn check_ids(&self) -> Result<(), FormError> {
        let mut seen = HashSet::new();
        for (index, question) in self.questions.iter().enumerate() {
            if question.id().is_empty() {
                return Err(FormError::MissingQuestionId { index });
            }
            if !seen.insert(question.id().as_str()) {
                return Err(FormError::DuplicateQuestionId(question.id().clone()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RawForm {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    questions: Vec<RawQuestion>,
}

/// Question as stored by the form service, with its field-name variations.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(default)]
    id: Option<QuestionId>,
    #[serde(default)]
    question_text: Option<String>,
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    field_type: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    required: Option<serde_json::Value>,
    #[serde(default)]
    options: Option<Vec<String>>,
}

impl RawForm {
    fn into_definition(self) -> Result<FormDefinition, FormError> {
        let questions = self
            .questions
            .into_iter()
            .enumerate()
            .map(|(index, raw)| raw.into_question(index))
            .collect::<Result<Vec<_>, _>>()?;

        let definition = FormDefinition {
            title: self.title,
            questions,
        };
        definition.check_ids()?;
        Ok(definition)
    }
}

impl RawQuestion {
    fn into_question(self, index: usize) -> Result<Question, FormError> {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .ok_or(FormError::MissingQuestionId { index })?;

        let text = [self.question_text, self.question, self.label]
            .into_iter()
            .flatten()
            .find(|t| !t.is_empty())
            .unwrap_or_else(|| format!("Question {}", index + 1));

        let kind = [self.field_type, self.kind]
            .into_iter()
            .flatten()
            .find(|k| !k.is_empty())
            .map(|k| FieldKind::from_wire(&k))
            .unwrap_or_default();

        // Only a literal `true` makes a question required.
        let required = matches!(self.required, Some(serde_json::Value::Bool(true)));

        Ok(Question::new(id, text, kind)
            .with_required(required)
            .with_options(self.options.unwrap_or_default()))
    }
}
