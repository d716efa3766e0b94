use serde::{Deserialize, Serialize};

/// A single answer stored in `Answers`.
///
/// Serializes untagged, so the wire form is either a JSON string or a JSON
/// array of strings, matching what the save and submit endpoints expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// A scalar answer (text, number, date, email, single choice, dropdown).
    Text(String),

    /// The checked options of a multi-choice question, in option order.
    Choices(Vec<String>),
}

impl AnswerValue {
    /// Check whether this value counts as "no answer" for required questions.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Choices(list) => list.is_empty(),
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Choices(_) => None,
        }
    }

    /// Try to get this value as a list of chosen options.
    pub fn as_choices(&self) -> Option<&[String]> {
        match self {
            Self::Choices(list) => Some(list),
            Self::Text(_) => None,
        }
    }

    /// Check whether `option` is selected by this value.
    ///
    /// Text values select by exact equality, lists by membership.
    pub fn selects(&self, option: &str) -> bool {
        match self {
            Self::Text(s) => s == option,
            Self::Choices(list) => list.iter().any(|o| o == option),
        }
    }

    /// Convert a loosely typed JSON value from a host page into an answer.
    ///
    /// Numbers and booleans are kept in their textual form. Returns `None`
    /// for `null`, objects and arrays that contain non-string items.
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        use serde_json::Value;

        match value {
            Value::String(s) => Some(Self::Text(s)),
            Value::Number(n) => Some(Self::Text(n.to_string())),
            Value::Bool(b) => Some(Self::Text(b.to_string())),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()
                .map(Self::Choices),
            Value::Null | Value::Object(_) => None,
        }
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "Text",
            Self::Choices(_) => "Choices",
        }
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(list: Vec<String>) -> Self {
        Self::Choices(list)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(list: Vec<&str>) -> Self {
        Self::Choices(list.into_iter().map(str::to_string).collect())
    }
}
