//! Hydration of form state from the attributes embedded in the host page.

use crate::{Answers, FormDefinition, FormError};

/// Everything the host page embeds for one form response.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedState {
    /// The form being filled in.
    pub definition: FormDefinition,

    /// Answers saved by an earlier visit.
    pub answers: Answers,

    /// The response identifier used in save/submit paths.
    pub response_id: String,
}

impl EmbeddedState {
    /// Parse the serialized `data-form`, `data-answers` and
    /// `data-response-id` attributes.
    ///
    /// Missing or blank JSON attributes are treated as `{}`. Saved answers
    /// for identifiers the form does not define are dropped, as are values
    /// that are neither strings nor string lists.
    pub fn from_attributes(
        form_json: Option<&str>,
        answers_json: Option<&str>,
        response_id: &str,
    ) -> Result<Self, FormError> {
        let definition = FormDefinition::from_json(non_blank(form_json))?;
        let answers = parse_answers(non_blank(answers_json))?;
        Ok(Self::new(definition, answers, response_id))
    }

    /// Build the state from already parsed parts, enforcing that every
    /// answer belongs to a known question.
    pub fn new(definition: FormDefinition, mut answers: Answers, response_id: &str) -> Self {
        for id in answers.retain_known(definition.questions()) {
            tracing::warn!(question = %id, "dropping saved answer for unknown question");
        }

        tracing::debug!(
            response_id,
            questions = definition.len(),
            answers = answers.len(),
            "hydrated form state"
        );

        Self {
            definition,
            answers,
            response_id: response_id.to_string(),
        }
    }
}

fn non_blank(attr: Option<&str>) -> &str {
    match attr.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => "{}",
    }
}

fn parse_answers(json: &str) -> Result<Answers, FormError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| FormError::InvalidAnswers(e.to_string()))?;

    let serde_json::Value::Object(object) = value else {
        return Err(FormError::InvalidAnswers(
            "saved answers must be a JSON object".to_string(),
        ));
    };

    let (answers, skipped) = Answers::from_json_object(object);
    for id in skipped {
        tracing::warn!(question = %id, "dropping saved answer with unsupported value");
    }
    Ok(answers)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM: &str = r#"{"questions": [
        {"id": "name", "question_text": "Name", "field_type": "text", "required": true},
        {"id": "contact", "question_text": "Contact", "field_type": "checkbox", "options": ["Phone", "Email"]}
    ]}"#;

    #[test]
    fn hydrates_definition_and_answers() {
        let state = EmbeddedState::from_attributes(
            Some(FORM),
            Some(r#"{"name": "Ada", "contact": ["Email"]}"#),
            "17",
        )
        .unwrap();

        assert_eq!(state.definition.len(), 2);
        assert_eq!(state.answers.get_text("name").unwrap(), "Ada");
        assert_eq!(state.answers.get_choices("contact").unwrap(), ["Email"]);
        assert_eq!(state.response_id, "17");
    }

    #[test]
    fn blank_attributes_default_to_empty_objects() {
        let state = EmbeddedState::from_attributes(None, Some("  "), "1").unwrap();
        assert!(state.definition.is_empty());
        assert!(state.answers.is_empty());
    }

    #[test]
    fn unknown_answer_ids_are_dropped() {
        let state =
            EmbeddedState::from_attributes(Some(FORM), Some(r#"{"ghost": "boo"}"#), "1").unwrap();
        assert!(state.answers.is_empty());
    }

    #[test]
    fn non_object_answers_are_rejected() {
        let err = EmbeddedState::from_attributes(Some(FORM), Some("[1, 2]"), "1").unwrap_err();
        assert!(matches!(err, FormError::InvalidAnswers(_)));
    }

    #[test]
    fn malformed_form_is_rejected() {
        let err = EmbeddedState::from_attributes(Some("{not json"), None, "1").unwrap_err();
        assert!(err.is_load_error());
    }
}
