use formfill_types::{FormDefinition, FormError};

/// Workplace incident report.
///
/// Uses the `question_text` and `field_type` spellings.
pub const JSON: &str = r#"{
    "title": "Incident Report",
    "questions": [
        {
            "id": "date",
            "question_text": "Date of the incident",
            "field_type": "date",
            "required": true
        },
        {
            "id": "location",
            "question_text": "Where did it happen?",
            "field_type": "select",
            "required": true,
            "options": ["Ward A", "Ward B", "Reception", "Car park"]
        },
        {
            "id": "people",
            "question_text": "Number of people involved",
            "field_type": "number"
        },
        {
            "id": "description",
            "question_text": "Describe what happened",
            "field_type": "textarea",
            "required": true
        },
        {
            "id": "reported_to",
            "question_text": "Who has this been reported to?",
            "field_type": "checkbox",
            "options": ["Line manager", "Safety officer", "Nobody yet"]
        }
    ]
}"#;

pub fn definition() -> Result<FormDefinition, FormError> {
    FormDefinition::from_json(JSON)
}
