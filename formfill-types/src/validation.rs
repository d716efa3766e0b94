use serde::{Deserialize, Serialize};

use crate::{Answers, Question, QuestionId};

/// Message shown next to a required question that has no answer.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// A required question without an answer.
///
/// Same shape as the `missing_fields` items returned by the submit endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingField {
    pub id: QuestionId,
    pub question: String,
}

impl MissingField {
    pub fn new(question: &Question) -> Self {
        Self {
            id: question.id().clone(),
            question: question.text().to_string(),
        }
    }
}

/// Check a single question against the answer map.
///
/// Fails only when the question is required and its answer is absent, an
/// empty string, or an empty list.
pub fn is_satisfied(question: &Question, answers: &Answers) -> bool {
    !question.is_required() || answers.has_value(question.id().as_str())
}

/// All required questions without an answer, in display order.
pub fn missing_required(questions: &[Question], answers: &Answers) -> Vec<MissingField> {
    questions
        .iter()
        .filter(|q| !is_satisfied(q, answers))
        .map(MissingField::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldKind;

    fn questions() -> Vec<Question> {
        vec![
            Question::new("name", "Name", FieldKind::ShortText).required(),
            Question::new("notes", "Notes", FieldKind::LongText),
            Question::new("contact", "Contact", FieldKind::MultiChoice)
                .required()
                .with_options(["Phone", "Email"]),
        ]
    }

    #[test]
    fn optional_questions_always_pass() {
        let qs = questions();
        assert!(is_satisfied(&qs[1], &Answers::new()));
    }

    #[test]
    fn empty_values_fail_required() {
        let qs = questions();
        let mut answers = Answers::new();
        answers.insert("name", "");
        answers.insert("contact", Vec::<String>::new());

        assert!(!is_satisfied(&qs[0], &answers));
        assert!(!is_satisfied(&qs[2], &answers));
    }

    #[test]
    fn missing_required_lists_only_offenders_in_order() {
        let qs = questions();
        let mut answers = Answers::new();
        answers.insert("contact", vec!["Email"]);

        let missing = missing_required(&qs, &answers);
        assert_eq!(
            missing,
            vec![MissingField {
                id: QuestionId::new("name"),
                question: "Name".to_string(),
            }]
        );
    }
}
