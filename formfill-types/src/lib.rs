//! Core types for the formfill crate.
//!
//! This crate provides the foundational types for dynamic forms:
//! - `FormDefinition` - The ordered question list, parsed from host-page JSON
//! - `Question` and `FieldKind` - Individual questions and their input kinds
//! - `Answers` and `AnswerValue` - The answer map keyed by `QuestionId`
//! - `EmbeddedState` - Hydration from the serialized page attributes
//! - Required-field validation shared by every display mode

mod question_id;
pub use question_id::QuestionId;

mod answer_value;
pub use answer_value::AnswerValue;

mod answers;
pub use answers::{AnswerError, Answers};

mod question;
pub use question::{FieldKind, Question};

mod form_definition;
pub use form_definition::FormDefinition;

mod error;
pub use error::FormError;

mod validation;
pub use validation::{MissingField, REQUIRED_MESSAGE, is_satisfied, missing_required};

pub mod loader;
pub use loader::EmbeddedState;
