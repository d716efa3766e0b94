use formfill_types::{FormDefinition, FormError};

/// Response id used by host pages rendering the feedback form.
pub const FEEDBACK_RESPONSE_ID: &str = "resp-feedback-001";

/// Post-visit feedback with face-rating radios.
///
/// Uses the `question` and `type` spellings.
pub const JSON: &str = r#"{
    "title": "Visit Feedback",
    "questions": [
        {
            "id": "overall",
            "question": "How was your visit overall?",
            "type": "radio",
            "required": true,
            "options": ["Happy", "Neutral", "Sad"]
        },
        {
            "id": "staff",
            "question": "How helpful were our staff?",
            "type": "radio",
            "options": ["Happy", "Neutral", "Sad"]
        },
        {
            "id": "improve",
            "question": "What could we do better?",
            "type": "textarea"
        },
        {
            "id": "contact",
            "question": "May we contact you about your feedback?",
            "type": "checkbox",
            "options": ["Email", "Phone", "Post"]
        },
        {
            "id": "email",
            "question": "Email address",
            "type": "email"
        }
    ]
}"#;

pub fn definition() -> Result<FormDefinition, FormError> {
    FormDefinition::from_json(JSON)
}
