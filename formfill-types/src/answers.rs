use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{AnswerValue, Question, QuestionId};

/// Error type for answer access operations.
#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("Missing answer for question: {0}")]
    Missing(QuestionId),

    #[error("Type mismatch for question '{id}': expected {expected}, got {actual}")]
    TypeMismatch {
        id: QuestionId,
        expected: &'static str,
        actual: &'static str,
    },
}

/// The answer map: current answers keyed by question identifier.
///
/// Ordered by identifier so that serialized snapshots are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers {
    values: BTreeMap<QuestionId, AnswerValue>,
}

impl Answers {
    /// Create a new empty answer map.
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Store an answer, overwriting any previous value.
    pub fn insert(&mut self, id: impl Into<QuestionId>, value: impl Into<AnswerValue>) {
        self.values.insert(id.into(), value.into());
    }

    /// Get the answer for a question.
    pub fn get(&self, id: &str) -> Option<&AnswerValue> {
        self.values.get(id)
    }

    /// Check if an answer exists for a question.
    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    /// Remove an answer.
    pub fn remove(&mut self, id: &str) -> Option<AnswerValue> {
        self.values.remove(id)
    }

    /// Get an iterator over all id-value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &AnswerValue)> {
        self.values.iter()
    }

    /// Get the number of answers.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no answers.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check if a question has a non-empty answer.
    ///
    /// Absent values, empty strings and empty lists all count as unanswered.
    pub fn has_value(&self, id: &str) -> bool {
        self.get(id).is_some_and(|value| !value.is_empty())
    }

    /// Drop answers whose identifiers are not among `questions`.
    ///
    /// Returns the identifiers that were removed.
    pub fn retain_known(&mut self, questions: &[Question]) -> Vec<QuestionId> {
        let mut dropped = Vec::new();
        self.values.retain(|id, _| {
            let known = questions.iter().any(|q| q.id() == id);
            if !known {
                dropped.push(id.clone());
            }
            known
        });
        dropped
    }

    /// Build an answer map from a loosely typed JSON object.
    ///
    /// Entries that cannot be represented are skipped and reported by id.
    pub fn from_json_object(
        object: serde_json::Map<String, serde_json::Value>,
    ) -> (Self, Vec<QuestionId>) {
        let mut answers = Self::new();
        let mut skipped = Vec::new();
        for (id, value) in object {
            match AnswerValue::from_json(value) {
                Some(value) => answers.insert(id, value),
                None => skipped.push(QuestionId::new(id)),
            }
        }
        (answers, skipped)
    }

    // === Convenience accessors ===

    /// Get a text answer.
    pub fn get_text(&self, id: &str) -> Result<&str, AnswerError> {
        match self.get(id) {
            Some(AnswerValue::Text(s)) => Ok(s),
            Some(other) => Err(AnswerError::TypeMismatch {
                id: QuestionId::new(id),
                expected: "Text",
                actual: other.type_name(),
            }),
            None => Err(AnswerError::Missing(QuestionId::new(id))),
        }
    }

    /// Get a multi-choice answer.
    pub fn get_choices(&self, id: &str) -> Result<&[String], AnswerError> {
        match self.get(id) {
            Some(AnswerValue::Choices(list)) => Ok(list),
            Some(other) => Err(AnswerError::TypeMismatch {
                id: QuestionId::new(id),
                expected: "Choices",
                actual: other.type_name(),
            }),
            None => Err(AnswerError::Missing(QuestionId::new(id))),
        }
    }
}

impl IntoIterator for Answers {
    type Item = (QuestionId, AnswerValue);
    type IntoIter = std::collections::btree_map::IntoIter<QuestionId, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Answers {
    type Item = (&'a QuestionId, &'a AnswerValue);
    type IntoIter = std::collections::btree_map::Iter<'a, QuestionId, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl FromIterator<(QuestionId, AnswerValue)> for Answers {
    fn from_iter<T: IntoIterator<Item = (QuestionId, AnswerValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldKind;
    use serde_json::json;

    #[test]
    fn insert_and_get() {
        let mut answers = Answers::new();
        answers.insert("name", "Alice");
        answers.insert("contact", vec!["Phone"]);

        assert_eq!(answers.get_text("name").unwrap(), "Alice");
        assert_eq!(answers.get_choices("contact").unwrap(), ["Phone"]);
    }

    #[test]
    fn insert_overwrites() {
        let mut answers = Answers::new();
        answers.insert("name", "Alice");
        answers.insert("name", "");
        assert_eq!(answers.get_text("name").unwrap(), "");
        assert!(!answers.has_value("name"));
        assert!(answers.contains("name"));
    }

    #[test]
    fn type_mismatch_error() {
        let mut answers = Answers::new();
        answers.insert("contact", vec!["Phone"]);

        let result = answers.get_text("contact");
        assert!(matches!(result, Err(AnswerError::TypeMismatch { .. })));
        assert!(matches!(
            answers.get_text("nope"),
            Err(AnswerError::Missing(_))
        ));
    }

    #[test]
    fn retain_known_drops_strays() {
        let questions = vec![Question::new("a", "A", FieldKind::ShortText)];
        let mut answers = Answers::new();
        answers.insert("a", "1");
        answers.insert("ghost", "2");

        let dropped = answers.retain_known(&questions);
        assert_eq!(dropped, vec![QuestionId::new("ghost")]);
        assert_eq!(answers.len(), 1);
    }

    #[test]
    fn from_json_object_skips_unrepresentable() {
        let object = json!({"a": "x", "b": ["1", "2"], "c": null, "d": 4})
            .as_object()
            .cloned()
            .unwrap();
        let (answers, skipped) = Answers::from_json_object(object);

        assert_eq!(answers.len(), 3);
        assert_eq!(answers.get_text("d").unwrap(), "4");
        assert_eq!(skipped, vec![QuestionId::new("c")]);
    }

    #[test]
    fn serializes_as_plain_object() {
        let mut answers = Answers::new();
        answers.insert("b", "2");
        answers.insert("a", vec!["x"]);
        assert_eq!(
            serde_json::to_value(&answers).unwrap(),
            json!({"a": ["x"], "b": "2"})
        );
    }
}
