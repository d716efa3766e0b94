use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Stable identifier of a question, e.g. `"question_1"`.
///
/// Used as the key in `Answers` and in the `id`/`for` attributes of the
/// rendered controls. Host pages sometimes embed numeric ids; those are
/// accepted and kept in their decimal string form.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct QuestionId {
    id: String,
}

impl QuestionId {
    /// Create a new identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// Check if the identifier is empty (not a usable id).
    pub fn is_empty(&self) -> bool {
        self.id.trim().is_empty()
    }

    /// The DOM id of the primary input control for this question.
    pub fn input_id(&self) -> String {
        format!("input-{}", self.id)
    }

    /// The DOM id of the inline "required" message for this question.
    pub fn validation_id(&self) -> String {
        format!("validation-{}", self.id)
    }

    /// The DOM id of the `index`-th option of a choice question.
    pub fn option_id(&self, index: usize) -> String {
        format!("option-{}-{index}", self.id)
    }
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self::new(s),
            RawId::Signed(n) => Self::new(n.to_string()),
            RawId::Unsigned(n) => Self::new(n.to_string()),
        })
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for QuestionId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&String> for QuestionId {
    fn from(s: &String) -> Self {
        Self::new(s.clone())
    }
}

impl From<&QuestionId> for QuestionId {
    fn from(id: &QuestionId) -> Self {
        id.clone()
    }
}

impl std::borrow::Borrow<str> for QuestionId {
    fn borrow(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new() {
        let id = QuestionId::new("question_1");
        assert_eq!(id.as_str(), "question_1");
    }

    #[test]
    fn dom_ids() {
        let id = QuestionId::new("q7");
        assert_eq!(id.input_id(), "input-q7");
        assert_eq!(id.validation_id(), "validation-q7");
        assert_eq!(id.option_id(2), "option-q7-2");
    }

    #[test]
    fn deserialize_numeric_id() {
        let id: QuestionId = serde_json::from_str("42").unwrap();
        assert_eq!(id.as_str(), "42");

        let id: QuestionId = serde_json::from_str("\"section_1\"").unwrap();
        assert_eq!(id.as_str(), "section_1");
    }

    #[test]
    fn blank_is_empty() {
        assert!(QuestionId::new("  ").is_empty());
        assert!(!QuestionId::new("a").is_empty());
    }

    #[test]
    fn display() {
        let id = QuestionId::new("incident_date");
        assert_eq!(format!("{}", id), "incident_date");
    }
}
