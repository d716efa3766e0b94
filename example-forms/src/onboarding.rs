use formfill_types::{FormDefinition, FormError};

/// Staff onboarding checklist with numeric ids and `label` text.
pub const JSON: &str = r#"{
    "questions": [
        { "id": 1, "label": "Full name", "required": true },
        { "id": 2, "label": "Start date", "type": "date", "required": true },
        { "id": 3, "label": "Department", "type": "select", "options": ["Nursing", "Admin", "Estates"] },
        { "id": 4, "label": "Anything we should know?", "type": "textarea", "required": "yes" }
    ]
}"#;

pub fn definition() -> Result<FormDefinition, FormError> {
    FormDefinition::from_json(JSON)
}
